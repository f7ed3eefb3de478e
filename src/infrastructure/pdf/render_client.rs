use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::{
    config::config_model::PdfRender,
    domain::{
        repositories::invoice_pdf::InvoicePdfRenderer,
        value_objects::invoice_documents::InvoiceDocumentModel,
    },
};

/// Client for the document-render service. Posts the structured invoice and
/// gets the PDF bytes back.
pub struct RenderServicePdfClient {
    http: reqwest::Client,
    base_url: String,
}

impl RenderServicePdfClient {
    pub fn new(config: &PdfRender) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl InvoicePdfRenderer for RenderServicePdfClient {
    async fn render(&self, document: InvoiceDocumentModel) -> Result<Vec<u8>> {
        let url = format!("{}/render/invoice", self.base_url);

        let response = self.http.post(&url).json(&document).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "PDF render service returned status {}: {}",
                status,
                body
            ));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
