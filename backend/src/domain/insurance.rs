//! Insurance policies and their renewal dates.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::labels::labelled_enum;
use super::schedule::{Frequency, annual_cost, days_until};
use super::validation::{FieldViolation, non_negative_cents, optional_text, required_text};

labelled_enum! {
    /// What an insurance policy covers.
    pub enum PolicyType as "policy type" {
        Home => "home",
        Contents => "contents",
        Car => "car",
        Life => "life",
        Health => "health",
        Travel => "travel",
        Pet => "pet",
        Other => "other",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsurancePolicy {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub provider: String,
    pub policy_number: Option<String>,
    pub policy_type: PolicyType,
    pub premium_cents: i64,
    pub premium_frequency: Frequency,
    pub start_date: Option<NaiveDate>,
    pub renewal_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InsurancePolicy {
    pub fn days_until_renewal(&self, today: NaiveDate) -> i64 {
        days_until(self.renewal_date, today)
    }

    pub fn annual_premium_cents(&self) -> i64 {
        annual_cost(self.premium_cents, self.premium_frequency)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsurancePolicyDraft {
    pub household_id: Option<Uuid>,
    pub provider: String,
    pub policy_number: Option<String>,
    pub policy_type: PolicyType,
    pub premium_cents: i64,
    pub premium_frequency: Frequency,
    pub start_date: Option<NaiveDate>,
    pub renewal_date: NaiveDate,
    pub notes: Option<String>,
}

impl InsurancePolicyDraft {
    /// Normalise text fields; a start date may not follow the renewal date.
    pub fn validated(self) -> Result<Self, FieldViolation> {
        if self
            .start_date
            .is_some_and(|start| start > self.renewal_date)
        {
            return Err(FieldViolation::new(
                "startDate",
                "after_renewal",
                "startDate must not be after renewalDate",
            ));
        }
        Ok(Self {
            provider: required_text("provider", &self.provider, 120)?,
            policy_number: optional_text("policyNumber", self.policy_number.as_deref(), 64)?,
            premium_cents: non_negative_cents("premiumCents", self.premium_cents)?,
            notes: optional_text("notes", self.notes.as_deref(), 4_000)?,
            ..self
        })
    }
}
