pub mod billing_actions;
pub mod company_settings;
pub mod invoice_documents;
pub mod invoice_statuses;
pub mod notifications;
pub mod reminder_schedule;
pub mod students;
