//! Rows for plants, care logs, reminders and code snippets.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{
    CareDates, CareLog, CodeSnippet, NewCareLog, Plant, PlantDraft, Reminder, ReminderDraft,
    ReminderSchedule, SnippetDraft,
};

use super::super::schema::{code_snippets, plant_care_logs, plants, reminders};
use super::parse_label;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = plants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PlantRow {
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

impl From<PlantRow> for Plant {
    fn from(row: PlantRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            species: row.species,
            location: row.location,
            acquired_on: row.acquired_on,
            watering_frequency: row.watering_frequency,
            fertilising_frequency: row.fertilising_frequency,
            last_watered_on: row.last_watered_on,
            last_fertilised_on: row.last_fertilised_on,
            is_active: row.is_active,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = plants, treat_none_as_null = true)]
pub(crate) struct PlantFields<'a> {
    pub name: &'a str,
    pub species: Option<&'a str>,
    pub location: Option<&'a str>,
    pub acquired_on: Option<NaiveDate>,
    pub watering_frequency: i32,
    pub fertilising_frequency: Option<i32>,
    pub last_watered_on: Option<NaiveDate>,
    pub last_fertilised_on: Option<NaiveDate>,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a PlantDraft> for PlantFields<'a> {
    fn from(draft: &'a PlantDraft) -> Self {
        Self {
            name: &draft.name,
            species: draft.species.as_deref(),
            location: draft.location.as_deref(),
            acquired_on: draft.acquired_on,
            watering_frequency: draft.watering_frequency,
            fertilising_frequency: draft.fertilising_frequency,
            last_watered_on: draft.last_watered_on,
            last_fertilised_on: draft.last_fertilised_on,
            notes: draft.notes.as_deref(),
        }
    }
}

/// Care date columns read before and written after a care log.
#[derive(Debug, AsChangeset, Queryable, Selectable)]
#[diesel(table_name = plants, treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CareDateFields {
    pub last_watered_on: Option<NaiveDate>,
    pub last_fertilised_on: Option<NaiveDate>,
}

impl From<CareDates> for CareDateFields {
    fn from(dates: CareDates) -> Self {
        Self {
            last_watered_on: dates.last_watered_on,
            last_fertilised_on: dates.last_fertilised_on,
        }
    }
}

impl From<CareDateFields> for CareDates {
    fn from(fields: CareDateFields) -> Self {
        Self {
            last_watered_on: fields.last_watered_on,
            last_fertilised_on: fields.last_fertilised_on,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = plant_care_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CareLogRow {
    pub id: Uuid,
    pub plant_id: Uuid,
    pub kind: String,
    pub performed_on: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<CareLogRow> for CareLog {
    type Error = RepositoryError;

    fn try_from(row: CareLogRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            plant_id: row.plant_id,
            kind: parse_label(&row.kind)?,
            performed_on: row.performed_on,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = plant_care_logs)]
pub(crate) struct CareLogFields<'a> {
    pub kind: &'static str,
    pub performed_on: NaiveDate,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a NewCareLog> for CareLogFields<'a> {
    fn from(log: &'a NewCareLog) -> Self {
        Self {
            kind: log.kind.as_str(),
            performed_on: log.performed_on,
            notes: log.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reminders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReminderRow {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDate,
    pub frequency: Option<String>,
    pub snoozed_until: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReminderRow> for Reminder {
    type Error = RepositoryError;

    fn try_from(row: ReminderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            frequency: row.frequency.as_deref().map(parse_label).transpose()?,
            snoozed_until: row.snoozed_until,
            completed_at: row.completed_at,
            created_at: row.created_at,
        })
    }
}

/// Editable reminder columns; snooze and completion move through
/// [`ReminderScheduleFields`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = reminders, treat_none_as_null = true)]
pub(crate) struct ReminderFields<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub due_date: NaiveDate,
    pub frequency: Option<&'static str>,
}

impl<'a> From<&'a ReminderDraft> for ReminderFields<'a> {
    fn from(draft: &'a ReminderDraft) -> Self {
        Self {
            title: &draft.title,
            description: draft.description.as_deref(),
            due_date: draft.due_date,
            frequency: draft.frequency.map(|frequency| frequency.as_str()),
        }
    }
}

#[derive(Debug, AsChangeset, Queryable, Selectable)]
#[diesel(table_name = reminders, treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReminderScheduleFields {
    pub due_date: NaiveDate,
    pub snoozed_until: Option<NaiveDate>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<ReminderSchedule> for ReminderScheduleFields {
    fn from(schedule: ReminderSchedule) -> Self {
        Self {
            due_date: schedule.due_date,
            snoozed_until: schedule.snoozed_until,
            completed_at: schedule.completed_at,
        }
    }
}

impl From<ReminderScheduleFields> for ReminderSchedule {
    fn from(fields: ReminderScheduleFields) -> Self {
        Self {
            due_date: fields.due_date,
            snoozed_until: fields.snoozed_until,
            completed_at: fields.completed_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = code_snippets)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct SnippetRow {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SnippetRow> for CodeSnippet {
    fn from(row: SnippetRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            language: row.language,
            code: row.code,
            description: row.description,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = code_snippets, treat_none_as_null = true)]
pub(crate) struct SnippetFields<'a> {
    pub title: &'a str,
    pub language: &'a str,
    pub code: &'a str,
    pub description: Option<&'a str>,
    pub tags: &'a [String],
}

impl<'a> From<&'a SnippetDraft> for SnippetFields<'a> {
    fn from(draft: &'a SnippetDraft) -> Self {
        Self {
            title: &draft.title,
            language: &draft.language,
            code: &draft.code,
            description: draft.description.as_deref(),
            tags: &draft.tags,
        }
    }
}
