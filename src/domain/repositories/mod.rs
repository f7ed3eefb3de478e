pub mod billing_invoices;
pub mod company_settings;
pub mod email;
pub mod invoice_pdf;
pub mod notifier;
pub mod recipients;
