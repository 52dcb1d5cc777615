//! Recurring household bills, their payments, and subscriptions.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::schedule::{Frequency, annual_cost, days_until, monthly_cost};
use super::validation::{FieldViolation, non_negative_cents, optional_text, required_text};

const NAME_MAX: usize = 120;
const NOTES_MAX: usize = 4_000;

/// A bill that falls due on a recurring schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub name: String,
    pub payee: Option<String>,
    pub amount_cents: i64,
    pub frequency: Frequency,
    pub next_due_date: NaiveDate,
    pub auto_pay: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Bill {
    /// Days until the bill is due; negative when overdue.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        days_until(self.next_due_date, today)
    }
}

/// Caller-supplied bill fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillDraft {
    pub household_id: Option<Uuid>,
    pub name: String,
    pub payee: Option<String>,
    pub amount_cents: i64,
    pub frequency: Frequency,
    pub next_due_date: NaiveDate,
    pub auto_pay: bool,
    pub notes: Option<String>,
}

impl BillDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: required_text("name", &self.name, NAME_MAX)?,
            payee: optional_text("payee", self.payee.as_deref(), NAME_MAX)?,
            amount_cents: non_negative_cents("amountCents", self.amount_cents)?,
            notes: optional_text("notes", self.notes.as_deref(), NOTES_MAX)?,
            ..self
        })
    }
}

/// Filters accepted by the bill listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BillFilter {
    pub household_id: Option<Uuid>,
}

/// A recorded payment against a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillPayment {
    pub id: Uuid,
    pub bill_id: Uuid,
    pub amount_cents: i64,
    pub paid_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payment values after defaults have been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBillPayment {
    pub amount_cents: i64,
    pub paid_on: NaiveDate,
    pub notes: Option<String>,
}

/// Payment with the bill's advanced due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillPaymentOutcome {
    pub payment: BillPayment,
    pub bill: Bill,
}

/// A subscription renewing on a recurring schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: Uuid,
    pub name: String,
    pub provider: Option<String>,
    pub amount_cents: i64,
    pub frequency: Frequency,
    pub next_renewal_date: NaiveDate,
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn monthly_cost_cents(&self) -> i64 {
        monthly_cost(self.amount_cents, self.frequency)
    }

    pub fn annual_cost_cents(&self) -> i64 {
        annual_cost(self.amount_cents, self.frequency)
    }

    pub fn days_until_renewal(&self, today: NaiveDate) -> i64 {
        days_until(self.next_renewal_date, today)
    }
}

/// Caller-supplied subscription fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionDraft {
    pub name: String,
    pub provider: Option<String>,
    pub amount_cents: i64,
    pub frequency: Frequency,
    pub next_renewal_date: NaiveDate,
    pub category: Option<String>,
    pub is_active: bool,
}

impl SubscriptionDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: required_text("name", &self.name, NAME_MAX)?,
            provider: optional_text("provider", self.provider.as_deref(), NAME_MAX)?,
            amount_cents: non_negative_cents("amountCents", self.amount_cents)?,
            category: optional_text("category", self.category.as_deref(), NAME_MAX)?,
            ..self
        })
    }
}

/// Totals across active subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubscriptionSummary {
    pub active_count: usize,
    pub monthly_total_cents: i64,
    pub annual_total_cents: i64,
}

impl SubscriptionSummary {
    /// Sum active subscriptions; inactive ones are ignored.
    ///
    /// The monthly total is derived from the summed annual cost so rounding
    /// happens once.
    pub fn from_subscriptions<'a>(
        subscriptions: impl IntoIterator<Item = &'a Subscription>,
    ) -> Self {
        let (active_count, annual_total_cents) = subscriptions
            .into_iter()
            .filter(|subscription| subscription.is_active)
            .fold((0_usize, 0_i64), |(count, annual), subscription| {
                (count + 1, annual.saturating_add(subscription.annual_cost_cents()))
            });
        Self {
            active_count,
            monthly_total_cents: monthly_cost(annual_total_cents, Frequency::Annually),
            annual_total_cents,
        }
    }
}
