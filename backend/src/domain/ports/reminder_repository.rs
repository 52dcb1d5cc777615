//! Port for reminders.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Reminder, ReminderDraft, ReminderSchedule, Transition, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReminderRepository: Send + Sync {
    async fn create(
        &self,
        owner: &UserId,
        draft: &ReminderDraft,
    ) -> Result<Reminder, RepositoryError>;

    /// Reminders ordered by due date; completed ones only when asked for.
    async fn list(
        &self,
        owner: &UserId,
        include_completed: bool,
    ) -> Result<Vec<Reminder>, RepositoryError>;

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Reminder, RepositoryError>;

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &ReminderDraft,
    ) -> Result<Reminder, RepositoryError>;

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Overwrite the due date, snooze and completion columns with
    /// `schedule.to`. Fails with `Stale` when the stored columns are no longer
    /// `schedule.from`.
    async fn set_schedule(
        &self,
        owner: &UserId,
        id: Uuid,
        schedule: Transition<ReminderSchedule>,
    ) -> Result<Reminder, RepositoryError>;
}
