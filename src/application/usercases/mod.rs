pub mod billing_run;
pub mod notification_dispatch;
