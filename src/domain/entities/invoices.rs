use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::postgres::schema::invoices;

/// One installment of a student's tuition plan. Created by the enrollment
/// workflow; this service only advances `status` and the reminder columns.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = invoices)]
pub struct InvoiceEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub installment_number: i32,
    pub amount_minor: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub first_reminder_sent: bool,
    pub first_reminder_sent_at: Option<DateTime<Utc>>,
    pub second_reminder_sent: bool,
    pub second_reminder_sent_at: Option<DateTime<Utc>>,
}
