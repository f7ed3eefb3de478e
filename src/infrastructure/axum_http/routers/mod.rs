pub mod billing_run;
