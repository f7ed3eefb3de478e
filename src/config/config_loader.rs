use anyhow::{Ok, Result};

use crate::config::stage::Stage;

use super::config_model::DotEnvyConfig;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let server = super::config_model::Server {
        port: std::env::var("SERVER_PORT")
            .expect("SERVER_PORT is invalid")
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .expect("SERVER_BODY_LIMIT is invalid")
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .expect("SERVER_TIMEOUT is invalid")
            .parse()?,
    };

    let database = super::config_model::Database {
        url: std::env::var("DATABASE_URL").expect("DATABASE_URL is invalid"),
    };

    let smtp = super::config_model::Smtp {
        host: std::env::var("SMTP_HOST").expect("SMTP_HOST is invalid"),
        port: std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()?,
        username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
        password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
        from_address: std::env::var("SMTP_FROM_ADDRESS").expect("SMTP_FROM_ADDRESS is invalid"),
        use_tls: std::env::var("SMTP_USE_TLS")
            .unwrap_or_else(|_| "true".to_string())
            .parse()?,
    };

    let pdf_render = super::config_model::PdfRender {
        base_url: std::env::var("PDF_RENDER_BASE_URL").expect("PDF_RENDER_BASE_URL is invalid"),
        timeout_secs: std::env::var("PDF_RENDER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()?,
    };

    let billing = super::config_model::BillingRun {
        internal_token: std::env::var("BILLING_INTERNAL_TOKEN").ok(),
        // Default cadence is one run per day.
        run_interval_secs: std::env::var("BILLING_RUN_INTERVAL_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()?,
    };

    Ok(DotEnvyConfig {
        server,
        database,
        smtp,
        pdf_render,
        billing,
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(stage_str.as_str()).unwrap_or_default()
}
