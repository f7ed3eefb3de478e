use chrono::{DateTime, Duration, Utc};

/// Reminder checkpoints for one invoice, derived from its issue and due
/// dates. The span is split into thirds, truncated to whole days, so on a
/// 0-2 day span the checkpoints may coincide with each other or with the
/// issue date.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderSchedule {
    pub first_reminder_at: DateTime<Utc>,
    pub second_reminder_at: DateTime<Utc>,
}

impl ReminderSchedule {
    pub fn between(issue_date: DateTime<Utc>, due_date: DateTime<Utc>) -> Self {
        let span_days = (due_date - issue_date).num_days().max(0);

        Self {
            first_reminder_at: issue_date + Duration::days(span_days / 3),
            second_reminder_at: issue_date + Duration::days(span_days * 2 / 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn nine_day_span_splits_at_day_three_and_six() {
        let schedule = ReminderSchedule::between(day(1), day(10));

        assert_eq!(schedule.first_reminder_at, day(4));
        assert_eq!(schedule.second_reminder_at, day(7));
    }

    #[test]
    fn thirty_day_span_splits_at_ten_and_twenty() {
        let schedule = ReminderSchedule::between(day(1), day(31));

        assert_eq!(schedule.first_reminder_at, day(11));
        assert_eq!(schedule.second_reminder_at, day(21));
    }

    #[test]
    fn short_span_checkpoints_coincide_with_issue_date() {
        let schedule = ReminderSchedule::between(day(1), day(3));

        assert_eq!(schedule.first_reminder_at, day(1));
        assert_eq!(schedule.second_reminder_at, day(2));
    }

    #[test]
    fn zero_span_collapses_to_issue_date() {
        let schedule = ReminderSchedule::between(day(5), day(5));

        assert_eq!(schedule.first_reminder_at, day(5));
        assert_eq!(schedule.second_reminder_at, day(5));
    }

    #[test]
    fn checkpoints_stay_ordered_within_the_span() {
        for span in 0..60 {
            let issue = day(1);
            let due = issue + Duration::days(span);
            let schedule = ReminderSchedule::between(issue, due);

            assert!(issue <= schedule.first_reminder_at);
            assert!(schedule.first_reminder_at <= schedule.second_reminder_at);
            assert!(schedule.second_reminder_at <= due);
        }
    }
}
