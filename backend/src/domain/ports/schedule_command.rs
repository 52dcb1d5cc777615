//! Driving port for schedule-advancing actions on bills, maintenance tasks,
//! plants and reminders.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    BillPaymentOutcome, CareKind, Error, MaintenanceCompletion, PlantCareOutcome, Reminder, UserId,
};

/// Payment request; absent values default to the bill amount and today.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentRequest {
    pub amount_cents: Option<i64>,
    pub paid_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Maintenance completion request; the date defaults to today.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionRequest {
    pub completed_on: Option<NaiveDate>,
    pub cost_cents: Option<i64>,
    pub notes: Option<String>,
}

/// Plant care request; the date defaults to today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareRequest {
    pub kind: CareKind,
    pub performed_on: Option<NaiveDate>,
    pub notes: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleCommand: Send + Sync {
    /// Record a payment and advance the bill past the payment date.
    async fn record_bill_payment(
        &self,
        owner: &UserId,
        bill_id: Uuid,
        request: PaymentRequest,
    ) -> Result<BillPaymentOutcome, Error>;

    /// Log a completion and reschedule the task from the completion date.
    async fn complete_maintenance_task(
        &self,
        owner: &UserId,
        task_id: Uuid,
        request: CompletionRequest,
    ) -> Result<MaintenanceCompletion, Error>;

    /// Log plant care, moving last-care dates forward where applicable.
    async fn log_plant_care(
        &self,
        owner: &UserId,
        plant_id: Uuid,
        request: CareRequest,
    ) -> Result<PlantCareOutcome, Error>;

    /// Snooze a reminder for `days` from today.
    async fn snooze_reminder(
        &self,
        owner: &UserId,
        reminder_id: Uuid,
        days: i64,
    ) -> Result<Reminder, Error>;

    /// Complete a reminder, advancing recurring ones.
    async fn complete_reminder(&self, owner: &UserId, reminder_id: Uuid)
    -> Result<Reminder, Error>;
}
