//! Port for insurance policies.
use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{InsurancePolicy, InsurancePolicyDraft, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InsuranceRepository: Send + Sync {
    async fn create(
        &self,
        owner: &UserId,
        draft: &InsurancePolicyDraft,
    ) -> Result<InsurancePolicy, RepositoryError>;

    /// Policies ordered by renewal date.
    async fn list(&self, owner: &UserId) -> Result<Vec<InsurancePolicy>, RepositoryError>;

    /// Policies renewing on or before `until`.
    async fn list_renewing_by(
        &self,
        owner: &UserId,
        until: NaiveDate,
    ) -> Result<Vec<InsurancePolicy>, RepositoryError>;

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<InsurancePolicy, RepositoryError>;

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &InsurancePolicyDraft,
    ) -> Result<InsurancePolicy, RepositoryError>;

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;
}
