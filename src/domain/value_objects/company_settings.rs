use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::company_settings::CompanySettingsEntity;

/// Company billing configuration, fetched once per scheduler run. The day
/// offsets are used to interpret stored invoice dates, never to recompute
/// them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanySettingsModel {
    pub company_name: String,
    pub support_email: String,
    pub currency_code: String,
    pub invoice_overdue_days: i32,
    pub invoice_send_gap_days: i32,
    pub payment_methods: Value,
}

impl From<CompanySettingsEntity> for CompanySettingsModel {
    fn from(entity: CompanySettingsEntity) -> Self {
        Self {
            company_name: entity.company_name,
            support_email: entity.support_email,
            currency_code: entity.currency_code,
            invoice_overdue_days: entity.invoice_overdue_days,
            invoice_send_gap_days: entity.invoice_send_gap_days,
            payment_methods: entity.payment_methods,
        }
    }
}
