//! PostgreSQL-backed `ReminderRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ReminderRepository, RepositoryError};
use crate::domain::{Reminder, ReminderDraft, ReminderSchedule, Transition, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{delete_owned, owner_id};
use super::models::{ReminderFields, ReminderRow, ReminderScheduleFields, convert_rows};
use super::pool::DbPool;
use super::schema::reminders;

const REMINDER: &str = "reminder";

/// Diesel-backed implementation of the `ReminderRepository` port.
#[derive(Clone)]
pub struct DieselReminderRepository {
    pool: DbPool,
}

impl DieselReminderRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReminderRepository for DieselReminderRepository {
    async fn create(
        &self,
        owner: &UserId,
        draft: &ReminderDraft,
    ) -> Result<Reminder, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(reminders::table)
            .values((
                reminders::id.eq(Uuid::new_v4()),
                reminders::user_id.eq(owner_id(owner)),
                ReminderFields::from(draft),
            ))
            .returning(ReminderRow::as_returning())
            .get_result::<ReminderRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, REMINDER))?
            .try_into()
    }

    async fn list(
        &self,
        owner: &UserId,
        include_completed: bool,
    ) -> Result<Vec<Reminder>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = reminders::table
            .filter(reminders::user_id.eq(owner_id(owner)))
            .select(ReminderRow::as_select())
            .order((reminders::due_date.asc(), reminders::title.asc()))
            .into_boxed();
        if !include_completed {
            query = query.filter(reminders::completed_at.is_null());
        }
        let rows = query
            .load::<ReminderRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, REMINDER))?;
        convert_rows(rows)
    }

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Reminder, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        reminders::table
            .find(id)
            .filter(reminders::user_id.eq(owner_id(owner)))
            .select(ReminderRow::as_select())
            .first::<ReminderRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, REMINDER))?
            .try_into()
    }

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &ReminderDraft,
    ) -> Result<Reminder, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            reminders::table
                .find(id)
                .filter(reminders::user_id.eq(owner_id(owner))),
        )
        .set(ReminderFields::from(draft))
        .returning(ReminderRow::as_returning())
        .get_result::<ReminderRow>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, REMINDER))?
        .try_into()
    }

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, reminders, id, owner_id(owner), REMINDER)
    }

    async fn set_schedule(
        &self,
        owner: &UserId,
        id: Uuid,
        schedule: Transition<ReminderSchedule>,
    ) -> Result<Reminder, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction::<_, RepositoryError, _>(|conn| {
                async move {
                    let stored = reminders::table
                        .find(id)
                        .filter(reminders::user_id.eq(owner))
                        .select(ReminderScheduleFields::as_select())
                        .for_update()
                        .first::<ReminderScheduleFields>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, REMINDER))?;
                    if !schedule.applies_to(&ReminderSchedule::from(stored)) {
                        return Err(RepositoryError::stale(REMINDER));
                    }
                    diesel::update(reminders::table.find(id))
                        .set(ReminderScheduleFields::from(schedule.to))
                        .returning(ReminderRow::as_returning())
                        .get_result::<ReminderRow>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, REMINDER))
                }
                .scope_boxed()
            })
            .await?;
        row.try_into()
    }
}
