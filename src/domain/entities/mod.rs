pub mod app_users;
pub mod company_settings;
pub mod invoices;
pub mod notifications;
pub mod students;
