pub mod billing_invoices;
pub mod company_settings;
pub mod notifications;
pub mod recipients;
