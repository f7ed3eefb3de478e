use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::value_objects::invoice_documents::InvoiceDocumentModel;

/// External document renderer; potentially slow and failable.
#[automock]
#[async_trait]
pub trait InvoicePdfRenderer {
    async fn render(&self, document: InvoiceDocumentModel) -> Result<Vec<u8>>;
}
