//! Vehicles, their statutory due dates and service history.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::labels::labelled_enum;
use super::schedule::days_until;
use super::validation::{FieldViolation, non_negative_cents, optional_text, required_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub registration: Option<String>,
    pub vin: Option<String>,
    pub mileage: Option<i32>,
    pub mot_due_date: Option<NaiveDate>,
    pub tax_due_date: Option<NaiveDate>,
    pub service_due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

labelled_enum! {
    /// Which vehicle date is being reported.
    pub enum VehicleDueKind as "vehicle due kind" {
        Mot => "mot",
        Tax => "tax",
        Service => "service",
    }
}

/// The earliest of a vehicle's due dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleDue {
    pub kind: VehicleDueKind,
    pub date: NaiveDate,
    pub days_until: i64,
}

impl Vehicle {
    /// Earliest MOT, tax or service date, including ones already missed.
    ///
    /// Ties resolve in the order MOT, tax, service.
    pub fn next_due(&self, today: NaiveDate) -> Option<VehicleDue> {
        [
            (VehicleDueKind::Mot, self.mot_due_date),
            (VehicleDueKind::Tax, self.tax_due_date),
            (VehicleDueKind::Service, self.service_due_date),
        ]
        .into_iter()
        .filter_map(|(kind, date)| date.map(|date| (kind, date)))
        .min_by_key(|(_, date)| *date)
        .map(|(kind, date)| VehicleDue {
            kind,
            date,
            days_until: days_until(date, today),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDraft {
    pub household_id: Option<Uuid>,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub registration: Option<String>,
    pub vin: Option<String>,
    pub mileage: Option<i32>,
    pub mot_due_date: Option<NaiveDate>,
    pub tax_due_date: Option<NaiveDate>,
    pub service_due_date: Option<NaiveDate>,
}

impl VehicleDraft {
    /// Registrations are upper-cased with spaces removed so uniqueness is
    /// checked against a canonical form.
    pub fn validated(self) -> Result<Self, FieldViolation> {
        if let Some(year) = self.year {
            if !(1886..=2100).contains(&year) {
                return Err(FieldViolation::out_of_range("year", 1886, 2100));
            }
        }
        if self.mileage.is_some_and(|m| m < 0) {
            return Err(FieldViolation::negative("mileage"));
        }
        let registration = optional_text("registration", self.registration.as_deref(), 16)?
            .map(|reg| canonical_registration(&reg));
        Ok(Self {
            make: required_text("make", &self.make, 60)?,
            model: required_text("model", &self.model, 60)?,
            registration,
            vin: optional_text("vin", self.vin.as_deref(), 17)?.map(|vin| vin.to_uppercase()),
            ..self
        })
    }
}

fn canonical_registration(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub serviced_on: NaiveDate,
    pub mileage: Option<i32>,
    pub description: String,
    pub cost_cents: Option<i64>,
    pub garage: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRecordDraft {
    pub serviced_on: NaiveDate,
    pub mileage: Option<i32>,
    pub description: String,
    pub cost_cents: Option<i64>,
    pub garage: Option<String>,
}

impl ServiceRecordDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        if self.mileage.is_some_and(|m| m < 0) {
            return Err(FieldViolation::negative("mileage"));
        }
        Ok(Self {
            description: required_text("description", &self.description, 2_000)?,
            cost_cents: self
                .cost_cents
                .map(|cents| non_negative_cents("costCents", cents))
                .transpose()?,
            garage: optional_text("garage", self.garage.as_deref(), 120)?,
            ..self
        })
    }
}

/// Mileage the vehicle should carry after a service at `service_mileage`.
///
/// Odometers only move forward, so a lower reading leaves the vehicle as is.
pub fn raised_mileage(current: Option<i32>, service_mileage: Option<i32>) -> Option<i32> {
    match (current, service_mileage) {
        (Some(current), Some(service)) => Some(current.max(service)),
        (None, service) => service,
        (current, None) => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn vehicle() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            household_id: None,
            make: "Volvo".into(),
            model: "V70".into(),
            year: Some(2012),
            registration: Some("AB12CDE".into()),
            vin: None,
            mileage: Some(90_000),
            mot_due_date: Some(date(2026, 5, 1)),
            tax_due_date: Some(date(2026, 4, 1)),
            service_due_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn next_due_picks_the_earliest_date() {
        let due = vehicle().next_due(date(2026, 3, 15)).expect("has due dates");
        assert_eq!(due.kind, VehicleDueKind::Tax);
        assert_eq!(due.days_until, 17);
    }

    #[test]
    fn next_due_reports_missed_dates() {
        let mut car = vehicle();
        car.service_due_date = Some(date(2026, 3, 1));
        let due = car.next_due(date(2026, 3, 15)).expect("has due dates");
        assert_eq!(due.kind, VehicleDueKind::Service);
        assert_eq!(due.days_until, -14);
    }

    #[test]
    fn next_due_is_none_without_dates() {
        let mut car = vehicle();
        car.mot_due_date = None;
        car.tax_due_date = None;
        assert!(car.next_due(date(2026, 3, 15)).is_none());
    }

    #[rstest]
    #[case(Some(100), Some(150), Some(150))]
    #[case(Some(200), Some(150), Some(200))]
    #[case(None, Some(150), Some(150))]
    #[case(Some(100), None, Some(100))]
    fn mileage_only_increases(
        #[case] current: Option<i32>,
        #[case] service: Option<i32>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(raised_mileage(current, service), expected);
    }

    #[test]
    fn registration_is_canonicalised() {
        let draft = VehicleDraft {
            household_id: None,
            make: "Ford".into(),
            model: "Fiesta".into(),
            year: None,
            registration: Some(" ab12 cde ".into()),
            vin: None,
            mileage: None,
            mot_due_date: None,
            tax_due_date: None,
            service_due_date: None,
        }
        .validated()
        .expect("valid vehicle");
        assert_eq!(draft.registration.as_deref(), Some("AB12CDE"));
    }
}
