//! Recurring-schedule arithmetic shared by bills, subscriptions, insurance,
//! maintenance, plants and reminders.
//!
//! Every function is pure: callers pass `today` explicitly so services can
//! take it from a clock and tests can pin it.

use chrono::{Days, Months, NaiveDate};

use super::labels::labelled_enum;

labelled_enum! {
    /// Recurrence interval for scheduled items.
    pub enum Frequency as "frequency" {
        Weekly => "weekly",
        Fortnightly => "fortnightly",
        Monthly => "monthly",
        Quarterly => "quarterly",
        Annually => "annually",
    }
}

impl Frequency {
    /// Number of occurrences in one year.
    pub fn occurrences_per_year(self) -> i64 {
        match self {
            Self::Weekly => 52,
            Self::Fortnightly => 26,
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Annually => 1,
        }
    }
}

/// Advance `date` by one `frequency` interval.
///
/// Month-based intervals clamp to the last valid day of the target month, so
/// 31 January plus one month is the last day of February. Dates at the end of
/// the supported calendar saturate at [`NaiveDate::MAX`].
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use wellf::domain::{Frequency, next_occurrence};
///
/// let due = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// assert_eq!(
///     next_occurrence(due, Frequency::Monthly),
///     NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
/// );
/// ```
pub fn next_occurrence(date: NaiveDate, frequency: Frequency) -> NaiveDate {
    let advanced = match frequency {
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::Fortnightly => date.checked_add_days(Days::new(14)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Quarterly => date.checked_add_months(Months::new(3)),
        Frequency::Annually => date.checked_add_months(Months::new(12)),
    };
    advanced.unwrap_or(NaiveDate::MAX)
}

/// Advance `due` at least once, then until it falls strictly after
/// `reference`.
///
/// Paying a bill early moves it one interval on; paying it months late skips
/// every missed interval.
pub fn next_occurrence_after(
    due: NaiveDate,
    frequency: Frequency,
    reference: NaiveDate,
) -> NaiveDate {
    let mut next = next_occurrence(due, frequency);
    while next <= reference && next != NaiveDate::MAX {
        next = next_occurrence(next, frequency);
    }
    next
}

/// Signed number of whole days from `today` to `date`.
///
/// Negative when `date` is in the past.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

/// Yearly total for a recurring amount in minor units.
pub fn annual_cost(amount_cents: i64, frequency: Frequency) -> i64 {
    amount_cents.saturating_mul(frequency.occurrences_per_year())
}

/// Average monthly cost: the annual total divided by 12, rounded half away
/// from zero.
pub fn monthly_cost(amount_cents: i64, frequency: Frequency) -> i64 {
    let annual = annual_cost(amount_cents, frequency);
    let quotient = annual / 12;
    let remainder = annual % 12;
    if remainder.abs() * 2 >= 12 {
        quotient + annual.signum()
    } else {
        quotient
    }
}

labelled_enum! {
    /// Read-time state of a reminder relative to today.
    pub enum DueState as "due state" {
        Completed => "completed",
        Snoozed => "snoozed",
        Overdue => "overdue",
        DueToday => "due_today",
        Upcoming => "upcoming",
    }
}

impl DueState {
    /// Classify a reminder.
    ///
    /// Completion wins over everything, then an active snooze (one that ends
    /// after today), then the position of `due_date` relative to `today`.
    pub fn evaluate(
        due_date: NaiveDate,
        snoozed_until: Option<NaiveDate>,
        completed: bool,
        today: NaiveDate,
    ) -> Self {
        if completed {
            return Self::Completed;
        }
        if snoozed_until.is_some_and(|until| until > today) {
            return Self::Snoozed;
        }
        match days_until(due_date, today) {
            d if d < 0 => Self::Overdue,
            0 => Self::DueToday,
            _ => Self::Upcoming,
        }
    }
}

/// Replacement of a stored schedule value.
///
/// Adapters apply `to` only while the stored value still equals `from`;
/// otherwise the write fails as stale and nothing changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition<T> {
    pub from: T,
    pub to: T,
}

impl<T: PartialEq> Transition<T> {
    /// Whether `current` is still the value this transition was computed from.
    pub fn applies_to(&self, current: &T) -> bool {
        self.from == *current
    }
}

/// Whole days a date lies in the past, zero when it is today or later.
pub fn days_overdue(due_date: NaiveDate, today: NaiveDate) -> i64 {
    (-days_until(due_date, today)).max(0)
}
