//! Port for vehicles and service records.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ServiceRecord, ServiceRecordDraft, UserId, Vehicle, VehicleDraft};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Insert a vehicle; a taken registration is `AlreadyExists`.
    async fn create(&self, owner: &UserId, draft: &VehicleDraft)
    -> Result<Vehicle, RepositoryError>;

    /// Vehicles ordered by make and model.
    async fn list(&self, owner: &UserId) -> Result<Vec<Vehicle>, RepositoryError>;

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Vehicle, RepositoryError>;

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &VehicleDraft,
    ) -> Result<Vehicle, RepositoryError>;

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Insert a service record, raising the vehicle mileage when the record
    /// reads higher, in one transaction.
    async fn add_service_record(
        &self,
        owner: &UserId,
        vehicle_id: Uuid,
        draft: &ServiceRecordDraft,
    ) -> Result<ServiceRecord, RepositoryError>;

    /// Service history, newest first.
    async fn list_service_records(
        &self,
        owner: &UserId,
        vehicle_id: Uuid,
    ) -> Result<Vec<ServiceRecord>, RepositoryError>;

    async fn delete_service_record(&self, owner: &UserId, id: Uuid)
    -> Result<(), RepositoryError>;
}
