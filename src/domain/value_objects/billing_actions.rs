use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::invoices::InvoiceEntity,
    value_objects::{invoice_statuses::InvoiceStatus, reminder_schedule::ReminderSchedule},
};

/// The single billing step an invoice may take in one scheduler pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum BillingAction {
    Issue,
    MarkOverdue,
    SecondReminder,
    FirstReminder,
}

impl Display for BillingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self {
            BillingAction::Issue => "issue",
            BillingAction::MarkOverdue => "mark_overdue",
            BillingAction::SecondReminder => "second_reminder",
            BillingAction::FirstReminder => "first_reminder",
        };
        write!(f, "{}", action)
    }
}

/// Selects at most one action for an invoice at time `now`.
///
/// Branches are checked in strict priority order: issue, overdue, second
/// reminder, first reminder. An overdue invoice is never also reminded in
/// the same pass, and the second reminder only fires after the first has
/// been recorded, so a run that lands straight in the second-reminder
/// window still sends the first reminder that pass and the second on the
/// next one.
///
/// Pure decision logic over an already-fetched row; terminal or unknown
/// statuses yield no action.
pub fn decide(invoice: &InvoiceEntity, now: DateTime<Utc>) -> Option<BillingAction> {
    let status = InvoiceStatus::try_from(invoice.status.as_str()).ok()?;

    match status {
        InvoiceStatus::Scheduled if now >= invoice.created_at => Some(BillingAction::Issue),
        InvoiceStatus::Pending => {
            if now >= invoice.due_date {
                return Some(BillingAction::MarkOverdue);
            }

            let schedule = ReminderSchedule::between(invoice.created_at, invoice.due_date);
            if now >= schedule.second_reminder_at
                && !invoice.second_reminder_sent
                && invoice.first_reminder_sent
            {
                Some(BillingAction::SecondReminder)
            } else if now >= schedule.first_reminder_at && !invoice.first_reminder_sent {
                Some(BillingAction::FirstReminder)
            } else {
                None
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap()
    }

    // Issue date day 1, due date day 10: reminders land on day 4 and day 7.
    fn invoice(status: &str) -> InvoiceEntity {
        InvoiceEntity {
            id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            installment_number: 1,
            amount_minor: 10_000,
            status: status.to_string(),
            created_at: day(1),
            due_date: day(10),
            first_reminder_sent: false,
            first_reminder_sent_at: None,
            second_reminder_sent: false,
            second_reminder_sent_at: None,
        }
    }

    #[test]
    fn scheduled_invoice_is_issued_once_active() {
        assert_eq!(decide(&invoice("scheduled"), day(1)), Some(BillingAction::Issue));
        assert_eq!(decide(&invoice("scheduled"), day(5)), Some(BillingAction::Issue));
    }

    #[test]
    fn scheduled_invoice_with_future_issue_date_is_left_alone() {
        assert_eq!(decide(&invoice("scheduled"), day(1) - Duration::hours(1)), None);
    }

    #[test]
    fn pending_invoice_before_first_checkpoint_is_a_noop() {
        assert_eq!(decide(&invoice("pending"), day(2)), None);
    }

    #[test]
    fn first_reminder_fires_in_the_first_window() {
        assert_eq!(
            decide(&invoice("pending"), day(5)),
            Some(BillingAction::FirstReminder)
        );
    }

    #[test]
    fn second_reminder_requires_the_first_to_have_been_sent() {
        // Run lands straight in the second-reminder window with no first
        // reminder recorded: the first one still goes out this pass.
        assert_eq!(
            decide(&invoice("pending"), day(8)),
            Some(BillingAction::FirstReminder)
        );

        let mut reminded = invoice("pending");
        reminded.first_reminder_sent = true;
        reminded.first_reminder_sent_at = Some(day(5));
        assert_eq!(
            decide(&reminded, day(8)),
            Some(BillingAction::SecondReminder)
        );
    }

    #[test]
    fn first_reminder_never_repeats() {
        let mut reminded = invoice("pending");
        reminded.first_reminder_sent = true;
        reminded.first_reminder_sent_at = Some(day(5));

        assert_eq!(decide(&reminded, day(5)), None);
    }

    #[test]
    fn overdue_wins_over_any_reminder() {
        // No reminder flags set at all; overdue still takes precedence.
        assert_eq!(
            decide(&invoice("pending"), day(11)),
            Some(BillingAction::MarkOverdue)
        );
    }

    #[test]
    fn fully_reminded_invoice_goes_overdue_at_the_due_date() {
        let mut reminded = invoice("pending");
        reminded.first_reminder_sent = true;
        reminded.second_reminder_sent = true;

        assert_eq!(decide(&reminded, day(9)), None);
        assert_eq!(decide(&reminded, day(10)), Some(BillingAction::MarkOverdue));
    }

    #[test]
    fn terminal_and_unknown_statuses_never_act() {
        assert_eq!(decide(&invoice("due"), day(20)), None);
        assert_eq!(decide(&invoice("paid"), day(20)), None);
        assert_eq!(decide(&invoice("cancelled"), day(20)), None);
        assert_eq!(decide(&invoice("garbage"), day(20)), None);
    }

    #[test]
    fn nine_day_span_walkthrough() {
        // Day 4 run: first reminder only.
        let fresh = invoice("pending");
        assert_eq!(decide(&fresh, day(5)), Some(BillingAction::FirstReminder));

        // Day 7 run with the first already sent: second reminder only.
        let mut after_first = invoice("pending");
        after_first.first_reminder_sent = true;
        after_first.first_reminder_sent_at = Some(day(5));
        assert_eq!(
            decide(&after_first, day(8)),
            Some(BillingAction::SecondReminder)
        );

        // Day 10 run: overdue.
        let mut after_second = after_first.clone();
        after_second.second_reminder_sent = true;
        after_second.second_reminder_sent_at = Some(day(8));
        assert_eq!(
            decide(&after_second, day(11)),
            Some(BillingAction::MarkOverdue)
        );
    }
}
