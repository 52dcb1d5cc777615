//! Recurring home maintenance tasks and their completion history.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::schedule::{Frequency, days_until};
use super::validation::{FieldViolation, non_negative_cents, optional_text, required_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceTask {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub name: String,
    pub category: Option<String>,
    pub frequency: Frequency,
    pub last_completed_on: Option<NaiveDate>,
    pub next_due_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MaintenanceTask {
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        days_until(self.next_due_date, today)
    }

    /// A task is overdue once its due date has passed; due today is not overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.next_due_date < today
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceTaskDraft {
    pub household_id: Option<Uuid>,
    pub name: String,
    pub category: Option<String>,
    pub frequency: Frequency,
    pub next_due_date: NaiveDate,
    pub notes: Option<String>,
}

impl MaintenanceTaskDraft {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: required_text("name", &self.name, 120)?,
            category: optional_text("category", self.category.as_deref(), 60)?,
            notes: optional_text("notes", self.notes.as_deref(), 4_000)?,
            ..self
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceLog {
    pub id: Uuid,
    pub task_id: Uuid,
    pub completed_on: NaiveDate,
    pub cost_cents: Option<i64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Completion values after the date default has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaintenanceLog {
    pub completed_on: NaiveDate,
    pub cost_cents: Option<i64>,
    pub notes: Option<String>,
}

impl NewMaintenanceLog {
    pub fn validated(self) -> Result<Self, FieldViolation> {
        Ok(Self {
            cost_cents: self
                .cost_cents
                .map(|cents| non_negative_cents("costCents", cents))
                .transpose()?,
            notes: optional_text("notes", self.notes.as_deref(), 4_000)?,
            ..self
        })
    }
}

/// Completion log plus the rescheduled task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceCompletion {
    pub log: MaintenanceLog,
    pub task: MaintenanceTask,
}
