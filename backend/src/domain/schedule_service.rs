//! Schedule service implementing the [`ScheduleCommand`] driving port.
//!
//! Every date decision (defaults, next due dates, snooze windows) is made
//! here against the injected clock; repositories only persist the outcome,
//! each in a single transaction guarded by the values the decision was based
//! on. A row that changed in between is rejected as stale.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    BillRepository, CareRequest, CompletionRequest, MaintenanceRepository, PaymentRequest,
    PlantRepository, ReminderRepository, ScheduleCommand,
};
use crate::domain::validation::{non_negative_cents, optional_text};
use crate::domain::{
    BillPaymentOutcome, CareDates, Error, MaintenanceCompletion, NewBillPayment, NewCareLog,
    NewMaintenanceLog, PlantCareOutcome, Reminder, Transition, UserId, next_occurrence,
    next_occurrence_after,
};

/// Schedule-advancing actions over the bill, maintenance, plant and reminder
/// repositories.
#[derive(Clone)]
pub struct ScheduleService<B, M, P, R> {
    bills: Arc<B>,
    maintenance: Arc<M>,
    plants: Arc<P>,
    reminders: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<B, M, P, R> ScheduleService<B, M, P, R> {
    /// Create a service over the given repositories and clock.
    pub fn new(
        bills: Arc<B>,
        maintenance: Arc<M>,
        plants: Arc<P>,
        reminders: Arc<R>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bills,
            maintenance,
            plants,
            reminders,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

#[async_trait]
impl<B, M, P, R> ScheduleCommand for ScheduleService<B, M, P, R>
where
    B: BillRepository,
    M: MaintenanceRepository,
    P: PlantRepository,
    R: ReminderRepository,
{
    async fn record_bill_payment(
        &self,
        owner: &UserId,
        bill_id: Uuid,
        request: PaymentRequest,
    ) -> Result<BillPaymentOutcome, Error> {
        let bill = self.bills.find(owner, bill_id).await?;
        let payment = NewBillPayment {
            amount_cents: non_negative_cents(
                "amountCents",
                request.amount_cents.unwrap_or(bill.amount_cents),
            )?,
            paid_on: request.paid_on.unwrap_or_else(|| self.today()),
            notes: optional_text("notes", request.notes.as_deref(), 2_000)?,
        };
        let due = Transition {
            from: bill.next_due_date,
            to: next_occurrence_after(bill.next_due_date, bill.frequency, payment.paid_on),
        };
        let outcome = self
            .bills
            .record_payment(owner, bill_id, &payment, due)
            .await?;
        info!(
            bill_id = %bill_id,
            paid_on = %payment.paid_on,
            next_due_date = %outcome.bill.next_due_date,
            "bill payment recorded"
        );
        Ok(outcome)
    }

    async fn complete_maintenance_task(
        &self,
        owner: &UserId,
        task_id: Uuid,
        request: CompletionRequest,
    ) -> Result<MaintenanceCompletion, Error> {
        let task = self.maintenance.find(owner, task_id).await?;
        let log = NewMaintenanceLog {
            completed_on: request.completed_on.unwrap_or_else(|| self.today()),
            cost_cents: request.cost_cents,
            notes: request.notes,
        }
        .validated()?;
        let due = Transition {
            from: task.next_due_date,
            to: next_occurrence(log.completed_on, task.frequency),
        };
        let completion = self
            .maintenance
            .record_completion(owner, task_id, &log, due)
            .await?;
        info!(
            task_id = %task_id,
            next_due_date = %completion.task.next_due_date,
            "maintenance task completed"
        );
        Ok(completion)
    }

    async fn log_plant_care(
        &self,
        owner: &UserId,
        plant_id: Uuid,
        request: CareRequest,
    ) -> Result<PlantCareOutcome, Error> {
        let plant = self.plants.find(owner, plant_id).await?;
        let log = NewCareLog {
            kind: request.kind,
            performed_on: request.performed_on.unwrap_or_else(|| self.today()),
            notes: optional_text("notes", request.notes.as_deref(), 2_000)?,
        };
        let dates = Transition {
            from: CareDates::of(&plant),
            to: CareDates::after_care(&plant, log.kind, log.performed_on),
        };
        let outcome = self
            .plants
            .record_care(owner, plant_id, &log, dates)
            .await?;
        info!(plant_id = %plant_id, kind = %log.kind, "plant care logged");
        Ok(outcome)
    }

    async fn snooze_reminder(
        &self,
        owner: &UserId,
        reminder_id: Uuid,
        days: i64,
    ) -> Result<Reminder, Error> {
        let reminder = self.reminders.find(owner, reminder_id).await?;
        let schedule = Transition {
            from: reminder.schedule(),
            to: reminder.snoozed(self.today(), days)?,
        };
        let reminder = self
            .reminders
            .set_schedule(owner, reminder_id, schedule)
            .await?;
        Ok(reminder)
    }

    async fn complete_reminder(
        &self,
        owner: &UserId,
        reminder_id: Uuid,
    ) -> Result<Reminder, Error> {
        let reminder = self.reminders.find(owner, reminder_id).await?;
        let now = self.clock.utc();
        let completed = reminder
            .completion(now.date_naive(), now)
            .ok_or_else(|| Error::conflict("reminder is already completed"))?;
        let schedule = Transition {
            from: reminder.schedule(),
            to: completed,
        };
        let reminder = self
            .reminders
            .set_schedule(owner, reminder_id, schedule)
            .await?;
        Ok(reminder)
    }
}

#[cfg(test)]
#[path = "schedule_service_tests.rs"]
mod tests;
