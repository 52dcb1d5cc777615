//! Port for maintenance tasks and their logs.
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    MaintenanceCompletion, MaintenanceLog, MaintenanceTask, MaintenanceTaskDraft,
    NewMaintenanceLog, Transition, UserId,
};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn create(
        &self,
        owner: &UserId,
        draft: &MaintenanceTaskDraft,
    ) -> Result<MaintenanceTask, RepositoryError>;

    /// Tasks ordered by next due date.
    async fn list(&self, owner: &UserId) -> Result<Vec<MaintenanceTask>, RepositoryError>;

    /// Tasks whose due date is strictly before `today`.
    async fn list_overdue(
        &self,
        owner: &UserId,
        today: NaiveDate,
    ) -> Result<Vec<MaintenanceTask>, RepositoryError>;

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<MaintenanceTask, RepositoryError>;

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &MaintenanceTaskDraft,
    ) -> Result<MaintenanceTask, RepositoryError>;

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Completion logs, newest first.
    async fn list_logs(
        &self,
        owner: &UserId,
        task_id: Uuid,
    ) -> Result<Vec<MaintenanceLog>, RepositoryError>;

    /// Insert the log, set `last_completed_on` and move `next_due_date`
    /// atomically. Fails with `Stale` when the stored due date is no longer
    /// `due.from`.
    async fn record_completion(
        &self,
        owner: &UserId,
        task_id: Uuid,
        log: &NewMaintenanceLog,
        due: Transition<NaiveDate>,
    ) -> Result<MaintenanceCompletion, RepositoryError>;
}
