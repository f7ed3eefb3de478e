use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::{
    application::usercases::notification_dispatch::NotificationDispatchUseCase,
    domain::{
        repositories::{
            billing_invoices::BillingInvoiceRepository,
            company_settings::CompanySettingsRepository,
        },
        value_objects::billing_actions::{BillingAction, decide},
    },
};

/// Result of one scheduler pass. The per-invoice error list is part of the
/// return value so callers see partial failures without digging through logs.
#[derive(Debug, Clone, Default)]
pub struct BillingRunSummary {
    pub scanned: usize,
    pub issued: usize,
    pub first_reminders: usize,
    pub second_reminders: usize,
    pub marked_overdue: usize,
    pub errors: Vec<String>,
}

/// Top-level batch driver. Walks every candidate invoice once, applies at
/// most one transition each, and keeps going when an individual invoice's
/// dispatch or persistence fails.
pub struct BillingRunUseCase {
    invoices: Arc<dyn BillingInvoiceRepository + Send + Sync>,
    company_settings: Arc<dyn CompanySettingsRepository + Send + Sync>,
    dispatcher: Arc<NotificationDispatchUseCase>,
}

impl BillingRunUseCase {
    pub fn new(
        invoices: Arc<dyn BillingInvoiceRepository + Send + Sync>,
        company_settings: Arc<dyn CompanySettingsRepository + Send + Sync>,
        dispatcher: Arc<NotificationDispatchUseCase>,
    ) -> Self {
        Self {
            invoices,
            company_settings,
            dispatcher,
        }
    }

    pub async fn run(&self, now: DateTime<Utc>) -> Result<BillingRunSummary> {
        // Settings and the candidate lists are the only fatal loads; anything
        // after this point is recovered per invoice.
        let settings = self.company_settings.get().await?;

        let mut candidates = self.invoices.list_issuable_scheduled(now).await?;
        candidates.extend(self.invoices.list_pending().await?);

        let mut summary = BillingRunSummary {
            scanned: candidates.len(),
            ..Default::default()
        };

        for invoice in candidates {
            let Some(action) = decide(&invoice, now) else {
                continue;
            };

            info!(
                invoice_id = %invoice.id,
                installment = invoice.installment_number,
                action = %action,
                "billing run: applying transition"
            );

            // Dispatch first, then persist. A crash in between can repeat a
            // notification on the next run; the state machine itself stays
            // consistent because decisions are re-derived from stored rows.
            let outcome = self.dispatcher.dispatch(&invoice, action, &settings).await;
            for dispatch_error in outcome.errors {
                summary
                    .errors
                    .push(format!("invoice {}: {}", invoice.id, dispatch_error));
            }

            let persisted = match action {
                BillingAction::Issue => self.invoices.mark_issued(invoice.id).await,
                BillingAction::MarkOverdue => self.invoices.mark_overdue(invoice.id).await,
                BillingAction::FirstReminder => {
                    self.invoices.mark_first_reminder_sent(invoice.id, now).await
                }
                BillingAction::SecondReminder => {
                    self.invoices.mark_second_reminder_sent(invoice.id, now).await
                }
            };

            match persisted {
                Ok(()) => match action {
                    BillingAction::Issue => summary.issued += 1,
                    BillingAction::MarkOverdue => summary.marked_overdue += 1,
                    BillingAction::FirstReminder => summary.first_reminders += 1,
                    BillingAction::SecondReminder => summary.second_reminders += 1,
                },
                Err(err) => {
                    // Left as-is in the store; the next run re-derives the
                    // same decision and retries.
                    error!(
                        invoice_id = %invoice.id,
                        action = %action,
                        error = ?err,
                        "billing run: failed to persist transition"
                    );
                    summary
                        .errors
                        .push(format!("invoice {}: persist {}: {}", invoice.id, action, err));
                }
            }
        }

        info!(
            scanned = summary.scanned,
            issued = summary.issued,
            first_reminders = summary.first_reminders,
            second_reminders = summary.second_reminders,
            marked_overdue = summary.marked_overdue,
            errors = summary.errors.len(),
            "billing run: completed"
        );

        Ok(summary)
    }
}
