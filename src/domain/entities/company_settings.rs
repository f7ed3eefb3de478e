use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::company_settings;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = company_settings)]
pub struct CompanySettingsEntity {
    pub id: Uuid,
    pub company_name: String,
    pub support_email: String,
    pub currency_code: String,
    pub invoice_overdue_days: i32,
    pub invoice_send_gap_days: i32,
    pub payment_methods: Value,
}
