//! PostgreSQL-backed `HouseholdRepository` implementation using Diesel ORM.
//!
//! Relationships are stored twice, once per direction, and both rows are
//! written or removed inside one transaction so a person's relationships can
//! be listed with a single filter on `person_id`.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{HouseholdRepository, RepositoryError};
use crate::domain::{
    Household, HouseholdDraft, Person, PersonDraft, Relationship, RelationshipDraft,
    RelationshipKind, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{delete_owned, owner_id, require_owned};
use super::models::{HouseholdRow, PersonFields, PersonRow, RelationshipRow, convert_rows};
use super::pool::DbPool;
use super::schema::{households, people, person_relationships};

/// Diesel-backed implementation of the `HouseholdRepository` port.
#[derive(Clone)]
pub struct DieselHouseholdRepository {
    pool: DbPool,
}

impl DieselHouseholdRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

async fn insert_relationship<C>(
    conn: &mut C,
    owner: Uuid,
    person_id: Uuid,
    related_person_id: Uuid,
    kind: RelationshipKind,
) -> Result<RelationshipRow, RepositoryError>
where
    C: AsyncConnection<Backend = Pg> + Send,
{
    diesel::insert_into(person_relationships::table)
        .values((
            person_relationships::id.eq(Uuid::new_v4()),
            person_relationships::user_id.eq(owner),
            person_relationships::person_id.eq(person_id),
            person_relationships::related_person_id.eq(related_person_id),
            person_relationships::kind.eq(kind.as_str()),
        ))
        .returning(RelationshipRow::as_returning())
        .get_result(conn)
        .await
        .map_err(|err| map_diesel_error(err, "relationship"))
}

#[async_trait]
impl HouseholdRepository for DieselHouseholdRepository {
    async fn create_household(
        &self,
        owner: &UserId,
        draft: &HouseholdDraft,
    ) -> Result<Household, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(households::table)
            .values((
                households::id.eq(Uuid::new_v4()),
                households::user_id.eq(owner_id(owner)),
                households::name.eq(draft.name.as_str()),
            ))
            .returning(HouseholdRow::as_returning())
            .get_result::<HouseholdRow>(&mut conn)
            .await
            .map(Household::from)
            .map_err(|err| map_diesel_error(err, "household"))
    }

    async fn list_households(&self, owner: &UserId) -> Result<Vec<Household>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = households::table
            .filter(households::user_id.eq(owner_id(owner)))
            .order((households::name.asc(), households::created_at.asc()))
            .select(HouseholdRow::as_select())
            .load::<HouseholdRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "household"))?;
        Ok(rows.into_iter().map(Household::from).collect())
    }

    async fn find_household(
        &self,
        owner: &UserId,
        id: Uuid,
    ) -> Result<Household, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        households::table
            .find(id)
            .filter(households::user_id.eq(owner_id(owner)))
            .select(HouseholdRow::as_select())
            .first::<HouseholdRow>(&mut conn)
            .await
            .map(Household::from)
            .map_err(|err| map_diesel_error(err, "household"))
    }

    async fn rename_household(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &HouseholdDraft,
    ) -> Result<Household, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            households::table
                .find(id)
                .filter(households::user_id.eq(owner_id(owner))),
        )
        .set(households::name.eq(draft.name.as_str()))
        .returning(HouseholdRow::as_returning())
        .get_result::<HouseholdRow>(&mut conn)
        .await
        .map(Household::from)
        .map_err(|err| map_diesel_error(err, "household"))
    }

    async fn delete_household(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, households, id, owner_id(owner), "household")
    }

    async fn create_person(
        &self,
        owner: &UserId,
        household_id: Uuid,
        draft: &PersonDraft,
    ) -> Result<Person, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, households, household_id, owner, "household");
        diesel::insert_into(people::table)
            .values((
                people::id.eq(Uuid::new_v4()),
                people::user_id.eq(owner),
                people::household_id.eq(household_id),
                PersonFields::from(draft),
            ))
            .returning(PersonRow::as_returning())
            .get_result::<PersonRow>(&mut conn)
            .await
            .map(Person::from)
            .map_err(|err| map_diesel_error(err, "person"))
    }

    async fn list_people(
        &self,
        owner: &UserId,
        household_id: Uuid,
    ) -> Result<Vec<Person>, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, households, household_id, owner, "household");
        let rows = people::table
            .filter(people::household_id.eq(household_id))
            .filter(people::user_id.eq(owner))
            .order((people::last_name.asc(), people::first_name.asc()))
            .select(PersonRow::as_select())
            .load::<PersonRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "person"))?;
        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn find_person(&self, owner: &UserId, id: Uuid) -> Result<Person, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        people::table
            .find(id)
            .filter(people::user_id.eq(owner_id(owner)))
            .select(PersonRow::as_select())
            .first::<PersonRow>(&mut conn)
            .await
            .map(Person::from)
            .map_err(|err| map_diesel_error(err, "person"))
    }

    async fn update_person(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &PersonDraft,
    ) -> Result<Person, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(people::table.find(id).filter(people::user_id.eq(owner_id(owner))))
            .set(PersonFields::from(draft))
            .returning(PersonRow::as_returning())
            .get_result::<PersonRow>(&mut conn)
            .await
            .map(Person::from)
            .map_err(|err| map_diesel_error(err, "person"))
    }

    async fn delete_person(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, people, id, owner_id(owner), "person")
    }

    async fn create_relationship(
        &self,
        owner: &UserId,
        draft: &RelationshipDraft,
    ) -> Result<Relationship, RepositoryError> {
        let owner = owner_id(owner);
        let draft = *draft;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction::<_, RepositoryError, _>(|conn| {
                async move {
                    require_owned!(conn, people, draft.person_id, owner, "person");
                    require_owned!(conn, people, draft.related_person_id, owner, "related person");
                    let forward = insert_relationship(
                        conn,
                        owner,
                        draft.person_id,
                        draft.related_person_id,
                        draft.kind,
                    )
                    .await?;
                    insert_relationship(
                        conn,
                        owner,
                        draft.related_person_id,
                        draft.person_id,
                        draft.kind.inverse(),
                    )
                    .await?;
                    Ok(forward)
                }
                .scope_boxed()
            })
            .await?;
        row.try_into()
    }

    async fn list_relationships(
        &self,
        owner: &UserId,
        person_id: Uuid,
    ) -> Result<Vec<Relationship>, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, people, person_id, owner, "person");
        let rows = person_relationships::table
            .filter(person_relationships::person_id.eq(person_id))
            .filter(person_relationships::user_id.eq(owner))
            .order(person_relationships::created_at.asc())
            .select(RelationshipRow::as_select())
            .load::<RelationshipRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "relationship"))?;
        convert_rows(rows)
    }

    async fn delete_relationship(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            async move {
                let forward = person_relationships::table
                    .find(id)
                    .filter(person_relationships::user_id.eq(owner))
                    .select(RelationshipRow::as_select())
                    .first::<RelationshipRow>(conn)
                    .await
                    .map_err(|err| map_diesel_error(err, "relationship"))?;
                let same_direction = person_relationships::person_id
                    .eq(forward.person_id)
                    .and(person_relationships::related_person_id.eq(forward.related_person_id));
                let inverse = person_relationships::person_id
                    .eq(forward.related_person_id)
                    .and(person_relationships::related_person_id.eq(forward.person_id));
                diesel::delete(
                    person_relationships::table
                        .filter(person_relationships::user_id.eq(owner))
                        .filter(same_direction.or(inverse)),
                )
                .execute(conn)
                .await
                .map_err(|err| map_diesel_error(err, "relationship"))?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}
