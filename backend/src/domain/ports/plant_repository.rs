//! Port for plants and their care logs.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    CareDates, CareLog, NewCareLog, Plant, PlantCareOutcome, PlantDraft, Transition, UserId,
};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlantRepository: Send + Sync {
    async fn create(&self, owner: &UserId, draft: &PlantDraft) -> Result<Plant, RepositoryError>;

    /// Plants ordered by name; retired plants only when `include_inactive`.
    async fn list(
        &self,
        owner: &UserId,
        include_inactive: bool,
    ) -> Result<Vec<Plant>, RepositoryError>;

    /// Fetch a plant, active or retired.
    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Plant, RepositoryError>;

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &PlantDraft,
    ) -> Result<Plant, RepositoryError>;

    /// Soft delete: clear `is_active`.
    async fn deactivate(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Care history, newest first.
    async fn list_care(
        &self,
        owner: &UserId,
        plant_id: Uuid,
    ) -> Result<Vec<CareLog>, RepositoryError>;

    /// Insert a care log and write `dates.to` to the plant atomically.
    ///
    /// Fails with `Stale` when the stored dates are no longer `dates.from`.
    async fn record_care(
        &self,
        owner: &UserId,
        plant_id: Uuid,
        log: &NewCareLog,
        dates: Transition<CareDates>,
    ) -> Result<PlantCareOutcome, RepositoryError>;
}
