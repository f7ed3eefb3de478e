use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    entities::invoices::InvoiceEntity,
    value_objects::{company_settings::CompanySettingsModel, students::StudentContactModel},
};

/// Structured input for the external PDF renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceDocumentModel {
    pub invoice_id: Uuid,
    pub installment_number: i32,
    pub amount_minor: i32,
    pub currency_code: String,
    pub issued_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub student_name: String,
    pub student_email: String,
    pub company_name: String,
    pub support_email: String,
    pub payment_methods: Value,
}

impl InvoiceDocumentModel {
    pub fn assemble(
        invoice: &InvoiceEntity,
        student: &StudentContactModel,
        settings: &CompanySettingsModel,
    ) -> Self {
        Self {
            invoice_id: invoice.id,
            installment_number: invoice.installment_number,
            amount_minor: invoice.amount_minor,
            currency_code: settings.currency_code.clone(),
            issued_at: invoice.created_at,
            due_date: invoice.due_date,
            student_name: student.full_name.clone(),
            student_email: student.email.clone(),
            company_name: settings.company_name.clone(),
            support_email: settings.support_email.clone(),
            payment_methods: settings.payment_methods.clone(),
        }
    }
}
