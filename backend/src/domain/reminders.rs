//! Calendar reminders with snoozing and optional recurrence.

use chrono::{DateTime, Days, NaiveDate, Utc};
use uuid::Uuid;

use super::schedule::{DueState, Frequency, days_overdue, next_occurrence_after};
use super::validation::{FieldViolation, optional_text, required_text};

/// Accepted snooze lengths in days.
pub const SNOOZE_DAYS: std::ops::RangeInclusive<i64> = 1..=365;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub frequency: Option<Frequency>,
    pub snoozed_until: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Schedule columns as currently stored.
    pub fn schedule(&self) -> ReminderSchedule {
        ReminderSchedule {
            due_date: self.due_date,
            snoozed_until: self.snoozed_until,
            completed_at: self.completed_at,
        }
    }

    pub fn due_state(&self, today: NaiveDate) -> DueState {
        DueState::evaluate(
            self.due_date,
            self.snoozed_until,
            self.completed_at.is_some(),
            today,
        )
    }

    /// Days past the due date; zero for completed or snoozed reminders.
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        match self.due_state(today) {
            DueState::Overdue => days_overdue(self.due_date, today),
            _ => 0,
        }
    }

    /// Schedule after completing on `today`, or `None` if already complete.
    ///
    /// Recurring reminders move to their next occurrence after today and lose
    /// any snooze; one-off reminders are stamped complete at `now`.
    pub fn completion(&self, today: NaiveDate, now: DateTime<Utc>) -> Option<ReminderSchedule> {
        if self.completed_at.is_some() {
            return None;
        }
        let schedule = match self.frequency {
            Some(frequency) => ReminderSchedule {
                due_date: next_occurrence_after(self.due_date, frequency, today),
                snoozed_until: None,
                completed_at: None,
            },
            None => ReminderSchedule {
                due_date: self.due_date,
                snoozed_until: self.snoozed_until,
                completed_at: Some(now),
            },
        };
        Some(schedule)
    }

    /// Schedule after snoozing for `days` from `today`.
    pub fn snoozed(&self, today: NaiveDate, days: i64) -> Result<ReminderSchedule, FieldViolation> {
        if !SNOOZE_DAYS.contains(&days) {
            return Err(FieldViolation::out_of_range(
                "days",
                *SNOOZE_DAYS.start(),
                *SNOOZE_DAYS.end(),
            ));
        }
        let until = u64::try_from(days)
            .ok()
            .and_then(|days| today.checked_add_days(Days::new(days)))
            .ok_or_else(|| FieldViolation::out_of_range("days", 1, 365))?;
        Ok(ReminderSchedule {
            due_date: self.due_date,
            snoozed_until: Some(until),
            completed_at: self.completed_at,
        })
    }
}

/// Schedule columns written back by snooze and completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSchedule {
    pub due_date: NaiveDate,
    pub snoozed_until: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub frequency: Option<Frequency>,
}

impl ReminderDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            title: required_text("title", &self.title, 200)?,
            description: optional_text("description", self.description.as_deref(), 2_000)?,
            ..self
        })
    }
}
