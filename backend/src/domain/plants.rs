//! House plants and their care schedules.
//!
//! Watering and fertilising intervals are whole days; plants are retired by
//! clearing `is_active` rather than being deleted.

use chrono::{DateTime, Days, NaiveDate, Utc};
use uuid::Uuid;

use super::labels::labelled_enum;
use super::validation::{FieldViolation, optional_text, required_text};

/// Longest accepted care interval in days.
pub const CARE_INTERVAL_MAX: i32 = 365;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    pub id: Uuid,
    pub name: String,
    pub species: Option<String>,
    pub location: Option<String>,
    pub acquired_on: Option<NaiveDate>,
    pub watering_frequency: i32,
    pub fertilising_frequency: Option<i32>,
    pub last_watered_on: Option<NaiveDate>,
    pub last_fertilised_on: Option<NaiveDate>,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn after_interval(last: NaiveDate, days: i32) -> NaiveDate {
    let days = u64::try_from(days.max(0)).unwrap_or_default();
    last.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

impl Plant {
    /// `None` until the plant has been watered once.
    pub fn next_watering_on(&self) -> Option<NaiveDate> {
        self.last_watered_on
            .map(|last| after_interval(last, self.watering_frequency))
    }

    /// `None` when the plant is never fertilised or has not been yet.
    pub fn next_fertilising_on(&self) -> Option<NaiveDate> {
        let interval = self.fertilising_frequency?;
        self.last_fertilised_on
            .map(|last| after_interval(last, interval))
    }

    /// A plant that has never been watered needs water.
    pub fn needs_water(&self, today: NaiveDate) -> bool {
        self.next_watering_on().is_none_or(|next| next <= today)
    }

    /// Only plants with a fertilising interval ever need fertiliser.
    pub fn needs_fertiliser(&self, today: NaiveDate) -> bool {
        self.fertilising_frequency.is_some()
            && self.next_fertilising_on().is_none_or(|next| next <= today)
    }

    /// Active plants needing water or fertiliser today or earlier.
    pub fn needs_care(&self, today: NaiveDate) -> bool {
        self.is_active && (self.needs_water(today) || self.needs_fertiliser(today))
    }
}

fn validate_interval(field: &'static str, days: i32) -> Result<i32, FieldViolation> {
    if !(1..=CARE_INTERVAL_MAX).contains(&days) {
        return Err(FieldViolation::out_of_range(
            field,
            1,
            i64::from(CARE_INTERVAL_MAX),
        ));
    }
    Ok(days)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantDraft {
    pub name: String,
    pub species: Option<String>,
    pub location: Option<String>,
    pub acquired_on: Option<NaiveDate>,
    pub watering_frequency: i32,
    pub fertilising_frequency: Option<i32>,
    pub last_watered_on: Option<NaiveDate>,
    pub last_fertilised_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl PlantDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: required_text("name", &self.name, 120)?,
            species: optional_text("species", self.species.as_deref(), 120)?,
            location: optional_text("location", self.location.as_deref(), 120)?,
            watering_frequency: validate_interval("wateringFrequency", self.watering_frequency)?,
            fertilising_frequency: self
                .fertilising_frequency
                .map(|days| validate_interval("fertilisingFrequency", days))
                .transpose()?,
            notes: optional_text("notes", self.notes.as_deref(), 2_000)?,
            ..self
        })
    }
}

labelled_enum! {
    pub enum CareKind as "care kind" {
        Water => "water",
        Fertilise => "fertilise",
        Repot => "repot",
        Prune => "prune",
        HealthCheck => "health_check",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareLog {
    pub id: Uuid,
    pub plant_id: Uuid,
    pub kind: CareKind,
    pub performed_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Care values after the date default has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCareLog {
    pub kind: CareKind,
    pub performed_on: NaiveDate,
    pub notes: Option<String>,
}

/// Last-care dates to persist alongside a care log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CareDates {
    pub last_watered_on: Option<NaiveDate>,
    pub last_fertilised_on: Option<NaiveDate>,
}

impl CareDates {
    /// Dates currently stored on `plant`.
    pub fn of(plant: &Plant) -> Self {
        Self {
            last_watered_on: plant.last_watered_on,
            last_fertilised_on: plant.last_fertilised_on,
        }
    }

    /// Dates after logging `kind` on `performed_on`.
    ///
    /// Back-dated logs never move a last-care date backwards.
    pub fn after_care(plant: &Plant, kind: CareKind, performed_on: NaiveDate) -> Self {
        let later = |current: Option<NaiveDate>| {
            Some(current.map_or(performed_on, |date| date.max(performed_on)))
        };
        Self {
            last_watered_on: match kind {
                CareKind::Water => later(plant.last_watered_on),
                _ => plant.last_watered_on,
            },
            last_fertilised_on: match kind {
                CareKind::Fertilise => later(plant.last_fertilised_on),
                _ => plant.last_fertilised_on,
            },
        }
    }
}

/// Care log plus the plant's updated dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantCareOutcome {
    pub log: CareLog,
    pub plant: Plant,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).expect("valid date")
    }

    #[fixture]
    fn fern() -> Plant {
        Plant {
            id: Uuid::new_v4(),
            name: "Fern".into(),
            species: None,
            location: Some("Bathroom".into()),
            acquired_on: None,
            watering_frequency: 3,
            fertilising_frequency: Some(14),
            last_watered_on: Some(date(10)),
            last_fertilised_on: Some(date(1)),
            is_active: true,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn next_dates_add_intervals(fern: Plant) {
        assert_eq!(fern.next_watering_on(), Some(date(13)));
        assert_eq!(fern.next_fertilising_on(), Some(date(15)));
    }

    #[rstest]
    #[case(12, false, false)]
    #[case(13, true, false)]
    #[case(15, true, true)]
    fn care_is_due_on_or_after_next_date(
        fern: Plant,
        #[case] day: u32,
        #[case] water: bool,
        #[case] fertiliser: bool,
    ) {
        assert_eq!(fern.needs_water(date(day)), water);
        assert_eq!(fern.needs_fertiliser(date(day)), fertiliser);
    }

    #[rstest]
    fn never_watered_plant_needs_water(mut fern: Plant) {
        fern.last_watered_on = None;
        assert!(fern.needs_water(date(1)));
    }

    #[rstest]
    fn plants_without_fertilising_interval_never_need_it(mut fern: Plant) {
        fern.fertilising_frequency = None;
        assert!(!fern.needs_fertiliser(date(31)));
    }

    #[rstest]
    fn inactive_plants_need_no_care(mut fern: Plant) {
        fern.is_active = false;
        assert!(!fern.needs_care(date(31)));
    }

    #[rstest]
    fn watering_moves_last_watered_forward(fern: Plant) {
        let dates = CareDates::after_care(&fern, CareKind::Water, date(14));
        assert_eq!(dates.last_watered_on, Some(date(14)));
        assert_eq!(dates.last_fertilised_on, Some(date(1)));
    }

    #[rstest]
    fn back_dated_care_keeps_later_date(fern: Plant) {
        let dates = CareDates::after_care(&fern, CareKind::Water, date(5));
        assert_eq!(dates.last_watered_on, Some(date(10)));
    }

    #[rstest]
    fn pruning_changes_no_dates(fern: Plant) {
        let dates = CareDates::after_care(&fern, CareKind::Prune, date(20));
        assert_eq!(dates.last_watered_on, fern.last_watered_on);
        assert_eq!(dates.last_fertilised_on, fern.last_fertilised_on);
    }

    #[test]
    fn interval_bounds_are_enforced() {
        let draft = PlantDraft {
            name: "Cactus".into(),
            species: None,
            location: None,
            acquired_on: None,
            watering_frequency: 0,
            fertilising_frequency: None,
            last_watered_on: None,
            last_fertilised_on: None,
            notes: None,
        };
        assert_eq!(
            draft.validated().expect_err("zero interval").field(),
            "wateringFrequency"
        );
    }
}
