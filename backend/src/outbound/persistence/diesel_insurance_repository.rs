//! PostgreSQL-backed `InsuranceRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{InsuranceRepository, RepositoryError};
use crate::domain::{InsurancePolicy, InsurancePolicyDraft, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{delete_owned, owner_id, require_owned};
use super::models::{InsurancePolicyFields, InsurancePolicyRow, convert_rows};
use super::pool::DbPool;
use super::schema::{households, insurance_policies};

const ENTITY: &str = "insurance policy";

/// Diesel-backed implementation of the `InsuranceRepository` port.
#[derive(Clone)]
pub struct DieselInsuranceRepository {
    pool: DbPool,
}

impl DieselInsuranceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InsuranceRepository for DieselInsuranceRepository {
    async fn create(
        &self,
        owner: &UserId,
        draft: &InsurancePolicyDraft,
    ) -> Result<InsurancePolicy, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(household_id) = draft.household_id {
            require_owned!(&mut conn, households, household_id, owner, "household");
        }
        diesel::insert_into(insurance_policies::table)
            .values((
                insurance_policies::id.eq(Uuid::new_v4()),
                insurance_policies::user_id.eq(owner),
                InsurancePolicyFields::from(draft),
            ))
            .returning(InsurancePolicyRow::as_returning())
            .get_result::<InsurancePolicyRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, ENTITY))?
            .try_into()
    }

    async fn list(&self, owner: &UserId) -> Result<Vec<InsurancePolicy>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = insurance_policies::table
            .filter(insurance_policies::user_id.eq(owner_id(owner)))
            .order((
                insurance_policies::renewal_date.asc(),
                insurance_policies::provider.asc(),
            ))
            .select(InsurancePolicyRow::as_select())
            .load::<InsurancePolicyRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, ENTITY))?;
        convert_rows(rows)
    }

    async fn list_renewing_by(
        &self,
        owner: &UserId,
        until: NaiveDate,
    ) -> Result<Vec<InsurancePolicy>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = insurance_policies::table
            .filter(insurance_policies::user_id.eq(owner_id(owner)))
            .filter(insurance_policies::renewal_date.le(until))
            .order(insurance_policies::renewal_date.asc())
            .select(InsurancePolicyRow::as_select())
            .load::<InsurancePolicyRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, ENTITY))?;
        convert_rows(rows)
    }

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<InsurancePolicy, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        insurance_policies::table
            .find(id)
            .filter(insurance_policies::user_id.eq(owner_id(owner)))
            .select(InsurancePolicyRow::as_select())
            .first::<InsurancePolicyRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, ENTITY))?
            .try_into()
    }

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &InsurancePolicyDraft,
    ) -> Result<InsurancePolicy, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(household_id) = draft.household_id {
            require_owned!(&mut conn, households, household_id, owner, "household");
        }
        diesel::update(
            insurance_policies::table
                .find(id)
                .filter(insurance_policies::user_id.eq(owner)),
        )
        .set(InsurancePolicyFields::from(draft))
        .returning(InsurancePolicyRow::as_returning())
        .get_result::<InsurancePolicyRow>(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, ENTITY))?
        .try_into()
    }

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, insurance_policies, id, owner_id(owner), ENTITY)
    }
}
