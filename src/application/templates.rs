use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::{
    entities::invoices::InvoiceEntity,
    value_objects::{
        billing_actions::BillingAction, company_settings::CompanySettingsModel,
        notifications::RenderedEmail, students::StudentContactModel,
    },
};

const ISSUED_SUBJECT: &str = "{{ company_name }}: invoice for installment {{ installment_number }}";
const ISSUED_BODY: &str = "\
<html><body>\
<p>Hi {{ student_name }},</p>\
<p>Your tuition invoice for installment {{ installment_number }} of {{ amount }} {{ currency_code }} \
has been issued. Payment is due by {{ due_date }}.</p>\
<p>The invoice is attached as a PDF. Questions? Reach us at {{ support_email }}.</p>\
<p>{{ company_name }}</p>\
</body></html>";

const FIRST_REMINDER_SUBJECT: &str =
    "Reminder: installment {{ installment_number }} is due {{ due_date }}";
const FIRST_REMINDER_BODY: &str = "\
<html><body>\
<p>Hi {{ student_name }},</p>\
<p>A friendly reminder that your tuition invoice for installment {{ installment_number }} \
({{ amount }} {{ currency_code }}) is due by {{ due_date }}.</p>\
<p>If you have already paid, please disregard this message.</p>\
<p>{{ company_name }}</p>\
</body></html>";

const SECOND_REMINDER_SUBJECT: &str =
    "Final reminder: installment {{ installment_number }} is due {{ due_date }}";
const SECOND_REMINDER_BODY: &str = "\
<html><body>\
<p>Hi {{ student_name }},</p>\
<p>This is the final reminder for your tuition invoice for installment {{ installment_number }} \
({{ amount }} {{ currency_code }}), due by {{ due_date }}.</p>\
<p>Please arrange payment to avoid the invoice becoming overdue. Questions? \
Reach us at {{ support_email }}.</p>\
<p>{{ company_name }}</p>\
</body></html>";

const OVERDUE_SUBJECT: &str = "Overdue: installment {{ installment_number }}";
const OVERDUE_BODY: &str = "\
<html><body>\
<p>Hi {{ student_name }},</p>\
<p>Your tuition invoice for installment {{ installment_number }} of {{ amount }} \
{{ currency_code }} was due on {{ due_date }} and is now overdue.</p>\
<p>Please settle the invoice as soon as possible, or contact us at {{ support_email }} \
if you need help.</p>\
<p>{{ company_name }}</p>\
</body></html>";

#[derive(Debug, Serialize)]
struct EmailTemplateData {
    student_name: String,
    installment_number: i32,
    amount: String,
    currency_code: String,
    due_date: String,
    company_name: String,
    support_email: String,
}

/// Pure email renderer: structured invoice data in, subject and HTML out.
/// Templates are registered once at construction.
pub struct NotificationTemplates {
    tera: Tera,
}

impl NotificationTemplates {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("issued_subject", ISSUED_SUBJECT),
            ("issued_body", ISSUED_BODY),
            ("first_reminder_subject", FIRST_REMINDER_SUBJECT),
            ("first_reminder_body", FIRST_REMINDER_BODY),
            ("second_reminder_subject", SECOND_REMINDER_SUBJECT),
            ("second_reminder_body", SECOND_REMINDER_BODY),
            ("overdue_subject", OVERDUE_SUBJECT),
            ("overdue_body", OVERDUE_BODY),
        ])?;
        Ok(Self { tera })
    }

    pub fn render_email(
        &self,
        action: BillingAction,
        invoice: &InvoiceEntity,
        student: &StudentContactModel,
        settings: &CompanySettingsModel,
    ) -> Result<RenderedEmail> {
        let data = EmailTemplateData {
            student_name: student.full_name.clone(),
            installment_number: invoice.installment_number,
            amount: format_amount(invoice.amount_minor),
            currency_code: settings.currency_code.clone(),
            due_date: invoice.due_date.format("%Y-%m-%d").to_string(),
            company_name: settings.company_name.clone(),
            support_email: settings.support_email.clone(),
        };
        let context = Context::from_serialize(&data)?;

        let (subject_template, body_template) = match action {
            BillingAction::Issue => ("issued_subject", "issued_body"),
            BillingAction::FirstReminder => ("first_reminder_subject", "first_reminder_body"),
            BillingAction::SecondReminder => ("second_reminder_subject", "second_reminder_body"),
            BillingAction::MarkOverdue => ("overdue_subject", "overdue_body"),
        };

        Ok(RenderedEmail {
            subject: self.tera.render(subject_template, &context)?,
            html: self.tera.render(body_template, &context)?,
        })
    }
}

/// In-app notification type string for an action.
pub fn notification_type(action: BillingAction) -> &'static str {
    match action {
        BillingAction::Issue => "invoice_issued",
        BillingAction::FirstReminder => "invoice_reminder",
        BillingAction::SecondReminder => "invoice_final_reminder",
        BillingAction::MarkOverdue => "invoice_overdue",
    }
}

pub fn in_app_title(action: BillingAction, invoice: &InvoiceEntity) -> String {
    match action {
        BillingAction::Issue => format!("Invoice issued for installment {}", invoice.installment_number),
        BillingAction::FirstReminder => {
            format!("Payment reminder for installment {}", invoice.installment_number)
        }
        BillingAction::SecondReminder => {
            format!("Final payment reminder for installment {}", invoice.installment_number)
        }
        BillingAction::MarkOverdue => {
            format!("Installment {} is overdue", invoice.installment_number)
        }
    }
}

pub fn in_app_message(
    action: BillingAction,
    invoice: &InvoiceEntity,
    settings: &CompanySettingsModel,
) -> String {
    let amount = format_amount(invoice.amount_minor);
    let due = invoice.due_date.format("%Y-%m-%d");
    match action {
        BillingAction::Issue => format!(
            "Invoice of {} {} issued, due by {}.",
            amount, settings.currency_code, due
        ),
        BillingAction::FirstReminder => format!(
            "Invoice of {} {} is due by {}.",
            amount, settings.currency_code, due
        ),
        BillingAction::SecondReminder => format!(
            "Last call: invoice of {} {} is due by {}.",
            amount, settings.currency_code, due
        ),
        BillingAction::MarkOverdue => format!(
            "Invoice of {} {} was due on {} and is now overdue.",
            amount, settings.currency_code, due
        ),
    }
}

fn format_amount(amount_minor: i32) -> String {
    format!("{}.{:02}", amount_minor / 100, amount_minor % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use uuid::Uuid;

    fn fixtures() -> (InvoiceEntity, StudentContactModel, CompanySettingsModel) {
        let invoice = InvoiceEntity {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            installment_number: 2,
            amount_minor: 12_550,
            status: "pending".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            due_date: Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap(),
            first_reminder_sent: false,
            first_reminder_sent_at: None,
            second_reminder_sent: false,
            second_reminder_sent_at: None,
        };
        let student = StudentContactModel {
            id: invoice.student_id,
            full_name: "Mina Jensen".to_string(),
            email: "mina@example.com".to_string(),
        };
        let settings = CompanySettingsModel {
            company_name: "Northlight Academy".to_string(),
            support_email: "billing@northlight.example".to_string(),
            currency_code: "EUR".to_string(),
            invoice_overdue_days: 30,
            invoice_send_gap_days: 30,
            payment_methods: json!(["bank_transfer"]),
        };
        (invoice, student, settings)
    }

    #[test]
    fn issued_email_contains_amount_and_due_date() {
        let (invoice, student, settings) = fixtures();
        let templates = NotificationTemplates::new().unwrap();

        let email = templates
            .render_email(BillingAction::Issue, &invoice, &student, &settings)
            .unwrap();

        assert!(email.subject.contains("Northlight Academy"));
        assert!(email.html.contains("Mina Jensen"));
        assert!(email.html.contains("125.50 EUR"));
        assert!(email.html.contains("2025-01-31"));
    }

    #[test]
    fn overdue_email_uses_overdue_wording() {
        let (invoice, student, settings) = fixtures();
        let templates = NotificationTemplates::new().unwrap();

        let email = templates
            .render_email(BillingAction::MarkOverdue, &invoice, &student, &settings)
            .unwrap();

        assert!(email.subject.starts_with("Overdue"));
        assert!(email.html.contains("now overdue"));
    }

    #[test]
    fn each_action_maps_to_a_distinct_notification_type() {
        let types = [
            notification_type(BillingAction::Issue),
            notification_type(BillingAction::FirstReminder),
            notification_type(BillingAction::SecondReminder),
            notification_type(BillingAction::MarkOverdue),
        ];
        for (i, a) in types.iter().enumerate() {
            for b in types.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn in_app_message_mentions_the_amount() {
        let (invoice, _, settings) = fixtures();
        let message = in_app_message(BillingAction::FirstReminder, &invoice, &settings);
        assert!(message.contains("125.50 EUR"));
    }
}
