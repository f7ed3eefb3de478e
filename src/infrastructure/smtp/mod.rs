pub mod lettre_mailer;
