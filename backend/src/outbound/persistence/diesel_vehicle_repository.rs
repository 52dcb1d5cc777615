//! PostgreSQL-backed `VehicleRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, VehicleRepository};
use crate::domain::{
    ServiceRecord, ServiceRecordDraft, UserId, Vehicle, VehicleDraft, raised_mileage,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{delete_owned, owner_id, require_owned};
use super::models::{ServiceRecordFields, ServiceRecordRow, VehicleFields, VehicleRow};
use super::pool::DbPool;
use super::schema::{households, vehicle_service_records, vehicles};

const VEHICLE: &str = "vehicle";
const SERVICE_RECORD: &str = "service record";

/// Diesel-backed implementation of the `VehicleRepository` port.
#[derive(Clone)]
pub struct DieselVehicleRepository {
    pool: DbPool,
}

impl DieselVehicleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for DieselVehicleRepository {
    async fn create(
        &self,
        owner: &UserId,
        draft: &VehicleDraft,
    ) -> Result<Vehicle, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(household_id) = draft.household_id {
            require_owned!(&mut conn, households, household_id, owner, "household");
        }
        diesel::insert_into(vehicles::table)
            .values((
                vehicles::id.eq(Uuid::new_v4()),
                vehicles::user_id.eq(owner),
                VehicleFields::from(draft),
            ))
            .returning(VehicleRow::as_returning())
            .get_result::<VehicleRow>(&mut conn)
            .await
            .map(Vehicle::from)
            .map_err(|err| map_diesel_error(err, VEHICLE))
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<Vehicle>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = vehicles::table
            .filter(vehicles::user_id.eq(owner_id(owner)))
            .order((vehicles::make.asc(), vehicles::model.asc()))
            .select(VehicleRow::as_select())
            .load::<VehicleRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, VEHICLE))?;
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Vehicle, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        vehicles::table
            .find(id)
            .filter(vehicles::user_id.eq(owner_id(owner)))
            .select(VehicleRow::as_select())
            .first::<VehicleRow>(&mut conn)
            .await
            .map(Vehicle::from)
            .map_err(|err| map_diesel_error(err, VEHICLE))
    }

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &VehicleDraft,
    ) -> Result<Vehicle, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(household_id) = draft.household_id {
            require_owned!(&mut conn, households, household_id, owner, "household");
        }
        diesel::update(vehicles::table.find(id).filter(vehicles::user_id.eq(owner)))
            .set(VehicleFields::from(draft))
            .returning(VehicleRow::as_returning())
            .get_result::<VehicleRow>(&mut conn)
            .await
            .map(Vehicle::from)
            .map_err(|err| map_diesel_error(err, VEHICLE))
    }

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, vehicles, id, owner_id(owner), VEHICLE)
    }

    async fn add_service_record(
        &self,
        owner: &UserId,
        vehicle_id: Uuid,
        draft: &ServiceRecordDraft,
    ) -> Result<ServiceRecord, RepositoryError> {
        let owner = owner_id(owner);
        let fields = ServiceRecordFields::from(draft);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction::<_, RepositoryError, _>(|conn| {
                async move {
                    let current = vehicles::table
                        .find(vehicle_id)
                        .filter(vehicles::user_id.eq(owner))
                        .select(vehicles::mileage)
                        .for_update()
                        .first::<Option<i32>>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, VEHICLE))?;
                    let raised = raised_mileage(current, fields.mileage);
                    if raised != current {
                        diesel::update(vehicles::table.find(vehicle_id))
                            .set(vehicles::mileage.eq(raised))
                            .execute(conn)
                            .await
                            .map_err(|err| map_diesel_error(err, VEHICLE))?;
                    }
                    diesel::insert_into(vehicle_service_records::table)
                        .values((
                            vehicle_service_records::id.eq(Uuid::new_v4()),
                            vehicle_service_records::user_id.eq(owner),
                            vehicle_service_records::vehicle_id.eq(vehicle_id),
                            &fields,
                        ))
                        .returning(ServiceRecordRow::as_returning())
                        .get_result::<ServiceRecordRow>(conn)
                        .await
                        .map_err(|err| map_diesel_error(err, SERVICE_RECORD))
                }
                .scope_boxed()
            })
            .await?;
        Ok(row.into())
    }

    async fn list_service_records(
        &self,
        owner: &UserId,
        vehicle_id: Uuid,
    ) -> Result<Vec<ServiceRecord>, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, vehicles, vehicle_id, owner, VEHICLE);
        let rows = vehicle_service_records::table
            .filter(vehicle_service_records::vehicle_id.eq(vehicle_id))
            .filter(vehicle_service_records::user_id.eq(owner))
            .order((
                vehicle_service_records::serviced_on.desc(),
                vehicle_service_records::created_at.desc(),
            ))
            .select(ServiceRecordRow::as_select())
            .load::<ServiceRecordRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, SERVICE_RECORD))?;
        Ok(rows.into_iter().map(ServiceRecord::from).collect())
    }

    async fn delete_service_record(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(
            &mut conn,
            vehicle_service_records,
            id,
            owner_id(owner),
            SERVICE_RECORD
        )
    }
}
