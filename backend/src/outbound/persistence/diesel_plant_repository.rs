//! PostgreSQL-backed `PlantRepository` implementation using Diesel ORM.
//!
//! Plants are never hard deleted: `deactivate` clears `is_active` and the
//! default listing hides retired plants.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{PlantRepository, RepositoryError};
use crate::domain::{
    CareDates, CareLog, NewCareLog, Plant, PlantCareOutcome, PlantDraft, Transition, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{owner_id, require_owned};
use super::models::{CareDateFields, CareLogFields, CareLogRow, PlantFields, PlantRow, convert_rows};
use super::pool::DbPool;
use super::schema::{plant_care_logs, plants};

const PLANT: &str = "plant";
const CARE_LOG: &str = "plant care log";

/// Diesel-backed implementation of the `PlantRepository` port.
#[derive(Clone)]
pub struct DieselPlantRepository {
    pool: DbPool,
}

impl DieselPlantRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlantRepository for DieselPlantRepository {
    async fn create(&self, owner: &UserId, draft: &PlantDraft) -> Result<Plant, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(plants::table)
            .values((
                plants::id.eq(Uuid::new_v4()),
                plants::user_id.eq(owner_id(owner)),
                PlantFields::from(draft),
            ))
            .returning(PlantRow::as_returning())
            .get_result::<PlantRow>(&mut conn)
            .await
            .map(Plant::from)
            .map_err(|err| map_diesel_error(err, PLANT))
    }

    async fn list(
        &self,
        owner: &UserId,
        include_inactive: bool,
    ) -> Result<Vec<Plant>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = plants::table
            .filter(plants::user_id.eq(owner_id(owner)))
            .select(PlantRow::as_select())
            .order((plants::name.asc(), plants::created_at.asc()))
            .into_boxed();
        if !include_inactive {
            query = query.filter(plants::is_active.eq(true));
        }
        let rows = query
            .load::<PlantRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, PLANT))?;
        Ok(rows.into_iter().map(Plant::from).collect())
    }

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Plant, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        plants::table
            .find(id)
            .filter(plants::user_id.eq(owner_id(owner)))
            .select(PlantRow::as_select())
            .first::<PlantRow>(&mut conn)
            .await
            .map(Plant::from)
            .map_err(|err| map_diesel_error(err, PLANT))
    }

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &PlantDraft,
    ) -> Result<Plant, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(plants::table.find(id).filter(plants::user_id.eq(owner_id(owner))))
            .set(PlantFields::from(draft))
            .returning(PlantRow::as_returning())
            .get_result::<PlantRow>(&mut conn)
            .await
            .map(Plant::from)
            .map_err(|err| map_diesel_error(err, PLANT))
    }

    async fn deactivate(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            plants::table
                .find(id)
                .filter(plants::user_id.eq(owner_id(owner))),
        )
        .set(plants::is_active.eq(false))
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, PLANT))?;
        if updated == 0 {
            return Err(RepositoryError::not_found(PLANT));
        }
        Ok(())
    }

    async fn list_care(
        &self,
        owner: &UserId,
        plant_id: Uuid,
    ) -> Result<Vec<CareLog>, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, plants, plant_id, owner, PLANT);
        let rows = plant_care_logs::table
            .filter(plant_care_logs::plant_id.eq(plant_id))
            .filter(plant_care_logs::user_id.eq(owner))
            .order((
                plant_care_logs::performed_on.desc(),
                plant_care_logs::created_at.desc(),
            ))
            .select(CareLogRow::as_select())
            .load::<CareLogRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, CARE_LOG))?;
        convert_rows(rows)
    }

    async fn record_care(
        &self,
        owner: &UserId,
        plant_id: Uuid,
        log: &NewCareLog,
        dates: Transition<CareDates>,
    ) -> Result<PlantCareOutcome, RepositoryError> {
        let owner = owner_id(owner);
        let fields = CareLogFields::from(log);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (log_row, plant_row) = conn
            .transaction::<_, RepositoryError, _>(|conn| {
                async move {
                    let stored = plants::table
                        .find(plant_id)
                        .filter(plants::user_id.eq(owner))
                        .select(CareDateFields::as_select())
                        .for_update()
                        .first::<CareDateFields>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, PLANT))?;
                    if !dates.applies_to(&CareDates::from(stored)) {
                        return Err(RepositoryError::stale(PLANT));
                    }
                    let plant_row = diesel::update(plants::table.find(plant_id))
                        .set(CareDateFields::from(dates.to))
                        .returning(PlantRow::as_returning())
                        .get_result::<PlantRow>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, PLANT))?;
                    let log_row = diesel::insert_into(plant_care_logs::table)
                        .values((
                            plant_care_logs::id.eq(Uuid::new_v4()),
                            plant_care_logs::user_id.eq(owner),
                            plant_care_logs::plant_id.eq(plant_id),
                            &fields,
                        ))
                        .returning(CareLogRow::as_returning())
                        .get_result::<CareLogRow>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, CARE_LOG))?;
                    Ok((log_row, plant_row))
                }
                .scope_boxed()
            })
            .await?;
        Ok(PlantCareOutcome {
            log: log_row.try_into()?,
            plant: plant_row.into(),
        })
    }
}
