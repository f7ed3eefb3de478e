use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::Utc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tuition_billing::{
    application::{
        templates::NotificationTemplates,
        usercases::{
            billing_run::BillingRunUseCase, notification_dispatch::NotificationDispatchUseCase,
        },
    },
    config::config_loader,
    domain::repositories::{
        billing_invoices::BillingInvoiceRepository, company_settings::CompanySettingsRepository,
        email::EmailSender, invoice_pdf::InvoicePdfRenderer, notifier::InAppNotifier,
        recipients::RecipientRepository,
    },
    infrastructure::{
        axum_http::http_serve,
        pdf::render_client::RenderServicePdfClient,
        postgres::{
            postgres_connection,
            repositories::{
                billing_invoices::BillingInvoicePostgres,
                company_settings::CompanySettingsPostgres,
                notifications::InAppNotificationPostgres, recipients::RecipientPostgres,
            },
        },
        smtp::lettre_mailer::LettreEmailSender,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(error) = run().await {
        error!("Billing scheduler exited with error: {}", error);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let dotenvy_env = Arc::new(config_loader::load()?);
    info!("ENV has been loaded");

    let postgres_pool = postgres_connection::establish_connection(&dotenvy_env.database.url)?;
    info!("Postgres connection has been established");

    let db_pool_arc = Arc::new(postgres_pool);

    let invoice_repository: Arc<dyn BillingInvoiceRepository + Send + Sync> =
        Arc::new(BillingInvoicePostgres::new(Arc::clone(&db_pool_arc)));
    let company_settings_repository: Arc<dyn CompanySettingsRepository + Send + Sync> =
        Arc::new(CompanySettingsPostgres::new(Arc::clone(&db_pool_arc)));
    let recipient_repository: Arc<dyn RecipientRepository + Send + Sync> =
        Arc::new(RecipientPostgres::new(Arc::clone(&db_pool_arc)));
    let in_app_notifier: Arc<dyn InAppNotifier + Send + Sync> =
        Arc::new(InAppNotificationPostgres::new(Arc::clone(&db_pool_arc)));

    let email_sender: Arc<dyn EmailSender + Send + Sync> =
        Arc::new(LettreEmailSender::new(&dotenvy_env.smtp)?);
    let pdf_renderer: Arc<dyn InvoicePdfRenderer + Send + Sync> =
        Arc::new(RenderServicePdfClient::new(&dotenvy_env.pdf_render)?);

    let dispatcher = Arc::new(NotificationDispatchUseCase::new(
        recipient_repository,
        email_sender,
        in_app_notifier,
        pdf_renderer,
        NotificationTemplates::new()?,
    ));

    let billing_run_usecase = Arc::new(BillingRunUseCase::new(
        invoice_repository,
        company_settings_repository,
        dispatcher,
    ));

    let server_config = Arc::clone(&dotenvy_env);
    let server_usecase = Arc::clone(&billing_run_usecase);
    let billing_server =
        tokio::spawn(async move { http_serve::start(server_config, server_usecase).await });

    let interval_secs = dotenvy_env.billing.run_interval_secs;
    let billing_loop = tokio::spawn(run_billing_loop(billing_run_usecase, interval_secs));

    tokio::select! {
        result = billing_server => result??,
        result = billing_loop => result??,
    };

    Ok(())
}

async fn run_billing_loop(usecase: Arc<BillingRunUseCase>, interval_secs: u64) -> Result<()> {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        interval.tick().await;

        info!("Starting scheduled billing run");
        match usecase.run(Utc::now()).await {
            Ok(summary) => {
                if !summary.errors.is_empty() {
                    error!(
                        errors = summary.errors.len(),
                        "Scheduled billing run finished with per-invoice errors"
                    );
                }
            }
            Err(err) => {
                // Store or settings unreachable; the next tick retries.
                error!("Scheduled billing run failed: {}", err);
            }
        }
    }
}
