use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::invoices::InvoiceEntity;

/// Read/write access to the invoice store. Writes touch only the status and
/// reminder columns of a single row, never any other field.
#[automock]
#[async_trait]
pub trait BillingInvoiceRepository {
    async fn list_issuable_scheduled(&self, now: DateTime<Utc>) -> Result<Vec<InvoiceEntity>>;
    async fn list_pending(&self) -> Result<Vec<InvoiceEntity>>;
    async fn mark_issued(&self, invoice_id: Uuid) -> Result<()>;
    async fn mark_overdue(&self, invoice_id: Uuid) -> Result<()>;
    async fn mark_first_reminder_sent(&self, invoice_id: Uuid, at: DateTime<Utc>) -> Result<()>;
    async fn mark_second_reminder_sent(&self, invoice_id: Uuid, at: DateTime<Utc>) -> Result<()>;
}
