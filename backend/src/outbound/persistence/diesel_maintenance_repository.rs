//! PostgreSQL-backed `MaintenanceRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{MaintenanceRepository, RepositoryError};
use crate::domain::{
    MaintenanceCompletion, MaintenanceLog, MaintenanceTask, MaintenanceTaskDraft,
    NewMaintenanceLog, Transition, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{delete_owned, owner_id, require_owned};
use super::models::{
    MaintenanceLogFields, MaintenanceLogRow, MaintenanceTaskFields, MaintenanceTaskRow,
    convert_rows,
};
use super::pool::DbPool;
use super::schema::{households, maintenance_logs, maintenance_tasks};

const TASK: &str = "maintenance task";
const LOG: &str = "maintenance log";

/// Diesel-backed implementation of the `MaintenanceRepository` port.
#[derive(Clone)]
pub struct DieselMaintenanceRepository {
    pool: DbPool,
}

impl DieselMaintenanceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceRepository for DieselMaintenanceRepository {
    async fn create(
        &self,
        owner: &UserId,
        draft: &MaintenanceTaskDraft,
    ) -> Result<MaintenanceTask, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(household_id) = draft.household_id {
            require_owned!(&mut conn, households, household_id, owner, "household");
        }
        diesel::insert_into(maintenance_tasks::table)
            .values((
                maintenance_tasks::id.eq(Uuid::new_v4()),
                maintenance_tasks::user_id.eq(owner),
                MaintenanceTaskFields::from(draft),
            ))
            .returning(MaintenanceTaskRow::as_returning())
            .get_result::<MaintenanceTaskRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, TASK))?
            .try_into()
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<MaintenanceTask>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = maintenance_tasks::table
            .filter(maintenance_tasks::user_id.eq(owner_id(owner)))
            .order((
                maintenance_tasks::next_due_date.asc(),
                maintenance_tasks::name.asc(),
            ))
            .select(MaintenanceTaskRow::as_select())
            .load::<MaintenanceTaskRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, TASK))?;
        convert_rows(rows)
    }

    async fn list_overdue(
        &self,
        owner: &UserId,
        today: NaiveDate,
    ) -> Result<Vec<MaintenanceTask>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = maintenance_tasks::table
            .filter(maintenance_tasks::user_id.eq(owner_id(owner)))
            .filter(maintenance_tasks::next_due_date.lt(today))
            .order(maintenance_tasks::next_due_date.asc())
            .select(MaintenanceTaskRow::as_select())
            .load::<MaintenanceTaskRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, TASK))?;
        convert_rows(rows)
    }

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<MaintenanceTask, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        maintenance_tasks::table
            .find(id)
            .filter(maintenance_tasks::user_id.eq(owner_id(owner)))
            .select(MaintenanceTaskRow::as_select())
            .first::<MaintenanceTaskRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, TASK))?
            .try_into()
    }

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &MaintenanceTaskDraft,
    ) -> Result<MaintenanceTask, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(household_id) = draft.household_id {
            require_owned!(&mut conn, households, household_id, owner, "household");
        }
        diesel::update(
            maintenance_tasks::table
                .find(id)
                .filter(maintenance_tasks::user_id.eq(owner)),
        )
        .set(MaintenanceTaskFields::from(draft))
        .returning(MaintenanceTaskRow::as_returning())
        .get_result::<MaintenanceTaskRow>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, TASK))?
        .try_into()
    }

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, maintenance_tasks, id, owner_id(owner), TASK)
    }

    async fn list_logs(
        &self,
        owner: &UserId,
        task_id: Uuid,
    ) -> Result<Vec<MaintenanceLog>, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, maintenance_tasks, task_id, owner, TASK);
        let rows = maintenance_logs::table
            .filter(maintenance_logs::task_id.eq(task_id))
            .filter(maintenance_logs::user_id.eq(owner))
            .order((
                maintenance_logs::completed_on.desc(),
                maintenance_logs::created_at.desc(),
            ))
            .select(MaintenanceLogRow::as_select())
            .load::<MaintenanceLogRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, LOG))?;
        Ok(rows.into_iter().map(MaintenanceLog::from).collect())
    }

    async fn record_completion(
        &self,
        owner: &UserId,
        task_id: Uuid,
        log: &NewMaintenanceLog,
        due: Transition<NaiveDate>,
    ) -> Result<MaintenanceCompletion, RepositoryError> {
        let owner = owner_id(owner);
        let fields = MaintenanceLogFields::from(log);
        let completed_on = log.completed_on;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (log_row, task_row) = conn
            .transaction::<_, RepositoryError, _>(|conn| {
                async move {
                    let stored = maintenance_tasks::table
                        .find(task_id)
                        .filter(maintenance_tasks::user_id.eq(owner))
                        .select(maintenance_tasks::next_due_date)
                        .for_update()
                        .first::<NaiveDate>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, TASK))?;
                    if !due.applies_to(&stored) {
                        return Err(RepositoryError::stale(TASK));
                    }
                    let task_row = diesel::update(maintenance_tasks::table.find(task_id))
                        .set((
                            maintenance_tasks::last_completed_on.eq(Some(completed_on)),
                            maintenance_tasks::next_due_date.eq(due.to),
                        ))
                        .returning(MaintenanceTaskRow::as_returning())
                        .get_result::<MaintenanceTaskRow>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, TASK))?;
                    let log_row = diesel::insert_into(maintenance_logs::table)
                        .values((
                            maintenance_logs::id.eq(Uuid::new_v4()),
                            maintenance_logs::user_id.eq(owner),
                            maintenance_logs::task_id.eq(task_id),
                            &fields,
                        ))
                        .returning(MaintenanceLogRow::as_returning())
                        .get_result::<MaintenanceLogRow>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, LOG))?;
                    Ok((log_row, task_row))
                }
                .scope_boxed()
            })
            .await?;
        Ok(MaintenanceCompletion {
            log: log_row.into(),
            task: task_row.try_into()?,
        })
    }
}
