use std::sync::Arc;

use serde_json::json;
use tracing::{error, warn};

use crate::{
    application::templates::{self, NotificationTemplates},
    domain::{
        entities::invoices::InvoiceEntity,
        repositories::{
            email::EmailSender, invoice_pdf::InvoicePdfRenderer, notifier::InAppNotifier,
            recipients::RecipientRepository,
        },
        value_objects::{
            billing_actions::BillingAction,
            company_settings::CompanySettingsModel,
            invoice_documents::InvoiceDocumentModel,
            notifications::{EmailMessage, InAppNotificationModel, PdfAttachment},
        },
    },
};

/// What a single dispatch managed to deliver. Failures are recorded, never
/// propagated: a lost email must not hold up the billing state machine.
#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    pub email_sent: bool,
    pub pdf_attached: bool,
    pub notifications_inserted: usize,
    pub errors: Vec<String>,
}

pub struct NotificationDispatchUseCase {
    recipients: Arc<dyn RecipientRepository + Send + Sync>,
    email_sender: Arc<dyn EmailSender + Send + Sync>,
    in_app_notifier: Arc<dyn InAppNotifier + Send + Sync>,
    pdf_renderer: Arc<dyn InvoicePdfRenderer + Send + Sync>,
    templates: NotificationTemplates,
}

impl NotificationDispatchUseCase {
    pub fn new(
        recipients: Arc<dyn RecipientRepository + Send + Sync>,
        email_sender: Arc<dyn EmailSender + Send + Sync>,
        in_app_notifier: Arc<dyn InAppNotifier + Send + Sync>,
        pdf_renderer: Arc<dyn InvoicePdfRenderer + Send + Sync>,
        templates: NotificationTemplates,
    ) -> Self {
        Self {
            recipients,
            email_sender,
            in_app_notifier,
            pdf_renderer,
            templates,
        }
    }

    /// Delivers the side effects of one billing transition: an email to the
    /// student (with the invoice PDF attached when the renderer cooperates)
    /// plus one in-app notification for the student and one mirrored per
    /// admin. Email, PDF, and each insert fail independently.
    pub async fn dispatch(
        &self,
        invoice: &InvoiceEntity,
        action: BillingAction,
        settings: &CompanySettingsModel,
    ) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        let student = match self.recipients.student_contact(invoice.student_id).await {
            Ok(student) => Some(student),
            Err(err) => {
                error!(
                    invoice_id = %invoice.id,
                    student_id = %invoice.student_id,
                    error = ?err,
                    "billing dispatch: failed to load student contact"
                );
                outcome.errors.push(format!("student contact: {err}"));
                None
            }
        };

        if let Some(student) = &student {
            let attachment = match self
                .pdf_renderer
                .render(InvoiceDocumentModel::assemble(invoice, student, settings))
                .await
            {
                Ok(bytes) => {
                    outcome.pdf_attached = true;
                    Some(PdfAttachment {
                        filename: format!("invoice-{}.pdf", invoice.id),
                        bytes,
                    })
                }
                Err(err) => {
                    // Degrade to a plain email rather than dropping the send.
                    warn!(
                        invoice_id = %invoice.id,
                        error = ?err,
                        "billing dispatch: PDF render failed; sending without attachment"
                    );
                    outcome.errors.push(format!("pdf render: {err}"));
                    None
                }
            };

            match self
                .templates
                .render_email(action, invoice, student, settings)
            {
                Ok(rendered) => {
                    let message = EmailMessage {
                        to: student.email.clone(),
                        subject: rendered.subject,
                        html: rendered.html,
                        attachment,
                    };
                    match self.email_sender.send(message).await {
                        Ok(()) => outcome.email_sent = true,
                        Err(err) => {
                            error!(
                                invoice_id = %invoice.id,
                                action = %action,
                                error = ?err,
                                "billing dispatch: email send failed"
                            );
                            outcome.errors.push(format!("email: {err}"));
                        }
                    }
                }
                Err(err) => {
                    error!(
                        invoice_id = %invoice.id,
                        action = %action,
                        error = ?err,
                        "billing dispatch: email template render failed"
                    );
                    outcome.errors.push(format!("email template: {err}"));
                }
            }
        }

        let metadata = json!({
            "invoice_id": invoice.id,
            "installment_number": invoice.installment_number,
            "action": action.to_string(),
        });
        let title = templates::in_app_title(action, invoice);
        let message = templates::in_app_message(action, invoice, settings);

        let mut recipient_ids = vec![invoice.student_id];
        match self.recipients.list_admin_user_ids().await {
            Ok(admin_ids) => recipient_ids.extend(admin_ids),
            Err(err) => {
                error!(
                    invoice_id = %invoice.id,
                    error = ?err,
                    "billing dispatch: failed to list admin recipients"
                );
                outcome.errors.push(format!("admin recipients: {err}"));
            }
        }

        for user_id in recipient_ids {
            let notification = InAppNotificationModel {
                user_id,
                type_: templates::notification_type(action).to_string(),
                title: title.clone(),
                message: message.clone(),
                metadata: metadata.clone(),
            };
            match self.in_app_notifier.insert(notification).await {
                Ok(()) => outcome.notifications_inserted += 1,
                Err(err) => {
                    error!(
                        invoice_id = %invoice.id,
                        user_id = %user_id,
                        error = ?err,
                        "billing dispatch: in-app notification insert failed"
                    );
                    outcome.errors.push(format!("notification {user_id}: {err}"));
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        email::MockEmailSender, invoice_pdf::MockInvoicePdfRenderer, notifier::MockInAppNotifier,
        recipients::MockRecipientRepository,
    };
    use crate::domain::value_objects::students::StudentContactModel;
    use anyhow::anyhow;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn invoice() -> InvoiceEntity {
        InvoiceEntity {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            installment_number: 1,
            amount_minor: 50_000,
            status: "pending".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            due_date: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            first_reminder_sent: false,
            first_reminder_sent_at: None,
            second_reminder_sent: false,
            second_reminder_sent_at: None,
        }
    }

    fn settings() -> CompanySettingsModel {
        CompanySettingsModel {
            company_name: "Northlight Academy".to_string(),
            support_email: "billing@northlight.example".to_string(),
            currency_code: "EUR".to_string(),
            invoice_overdue_days: 28,
            invoice_send_gap_days: 30,
            payment_methods: serde_json::json!(["bank_transfer"]),
        }
    }

    fn contact_for(invoice: &InvoiceEntity) -> StudentContactModel {
        StudentContactModel {
            id: invoice.student_id,
            full_name: "Mina Jensen".to_string(),
            email: "mina@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn happy_path_sends_email_and_notifies_student_and_admins() {
        let invoice = invoice();
        let contact = contact_for(&invoice);
        let admin_id = Uuid::new_v4();

        let mut recipients = MockRecipientRepository::new();
        recipients
            .expect_student_contact()
            .returning(move |_| Ok(contact.clone()));
        recipients
            .expect_list_admin_user_ids()
            .returning(move || Ok(vec![admin_id]));

        let mut email_sender = MockEmailSender::new();
        email_sender
            .expect_send()
            .times(1)
            .withf(|message| {
                message.to == "mina@example.com" && message.attachment.is_some()
            })
            .returning(|_| Ok(()));

        let mut notifier = MockInAppNotifier::new();
        notifier.expect_insert().times(2).returning(|_| Ok(()));

        let mut pdf = MockInvoicePdfRenderer::new();
        pdf.expect_render().returning(|_| Ok(vec![0x25, 0x50, 0x44, 0x46]));

        let usecase = NotificationDispatchUseCase::new(
            Arc::new(recipients),
            Arc::new(email_sender),
            Arc::new(notifier),
            Arc::new(pdf),
            NotificationTemplates::new().unwrap(),
        );

        let outcome = usecase
            .dispatch(&invoice, BillingAction::FirstReminder, &settings())
            .await;

        assert!(outcome.email_sent);
        assert!(outcome.pdf_attached);
        assert_eq!(outcome.notifications_inserted, 2);
        assert!(outcome.errors.is_empty());
    }

    #[tokio::test]
    async fn email_failure_does_not_block_in_app_notifications() {
        let invoice = invoice();
        let contact = contact_for(&invoice);

        let mut recipients = MockRecipientRepository::new();
        recipients
            .expect_student_contact()
            .returning(move |_| Ok(contact.clone()));
        recipients
            .expect_list_admin_user_ids()
            .returning(|| Ok(vec![]));

        let mut email_sender = MockEmailSender::new();
        email_sender
            .expect_send()
            .returning(|_| Err(anyhow!("smtp: connection refused")));

        let mut notifier = MockInAppNotifier::new();
        notifier.expect_insert().times(1).returning(|_| Ok(()));

        let mut pdf = MockInvoicePdfRenderer::new();
        pdf.expect_render().returning(|_| Ok(vec![1, 2, 3]));

        let usecase = NotificationDispatchUseCase::new(
            Arc::new(recipients),
            Arc::new(email_sender),
            Arc::new(notifier),
            Arc::new(pdf),
            NotificationTemplates::new().unwrap(),
        );

        let outcome = usecase
            .dispatch(&invoice, BillingAction::MarkOverdue, &settings())
            .await;

        assert!(!outcome.email_sent);
        assert_eq!(outcome.notifications_inserted, 1);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[tokio::test]
    async fn pdf_failure_degrades_to_plain_email() {
        let invoice = invoice();
        let contact = contact_for(&invoice);

        let mut recipients = MockRecipientRepository::new();
        recipients
            .expect_student_contact()
            .returning(move |_| Ok(contact.clone()));
        recipients
            .expect_list_admin_user_ids()
            .returning(|| Ok(vec![]));

        let mut email_sender = MockEmailSender::new();
        email_sender
            .expect_send()
            .times(1)
            .withf(|message| message.attachment.is_none())
            .returning(|_| Ok(()));

        let mut notifier = MockInAppNotifier::new();
        notifier.expect_insert().returning(|_| Ok(()));

        let mut pdf = MockInvoicePdfRenderer::new();
        pdf.expect_render()
            .returning(|_| Err(anyhow!("render service timed out")));

        let usecase = NotificationDispatchUseCase::new(
            Arc::new(recipients),
            Arc::new(email_sender),
            Arc::new(notifier),
            Arc::new(pdf),
            NotificationTemplates::new().unwrap(),
        );

        let outcome = usecase
            .dispatch(&invoice, BillingAction::Issue, &settings())
            .await;

        assert!(outcome.email_sent);
        assert!(!outcome.pdf_attached);
        assert_eq!(outcome.errors.len(), 1);
    }

    #[tokio::test]
    async fn missing_student_contact_still_notifies_admins() {
        let invoice = invoice();
        let admin_id = Uuid::new_v4();

        let mut recipients = MockRecipientRepository::new();
        recipients
            .expect_student_contact()
            .returning(|_| Err(anyhow!("student not found")));
        recipients
            .expect_list_admin_user_ids()
            .returning(move || Ok(vec![admin_id]));

        let email_sender = MockEmailSender::new();
        let pdf = MockInvoicePdfRenderer::new();

        let mut notifier = MockInAppNotifier::new();
        // Student row is still inserted; delivery surfaces in their inbox
        // even when the email address lookup failed.
        notifier.expect_insert().times(2).returning(|_| Ok(()));

        let usecase = NotificationDispatchUseCase::new(
            Arc::new(recipients),
            Arc::new(email_sender),
            Arc::new(notifier),
            Arc::new(pdf),
            NotificationTemplates::new().unwrap(),
        );

        let outcome = usecase
            .dispatch(&invoice, BillingAction::SecondReminder, &settings())
            .await;

        assert!(!outcome.email_sent);
        assert_eq!(outcome.notifications_inserted, 2);
        assert_eq!(outcome.errors.len(), 1);
    }
}
