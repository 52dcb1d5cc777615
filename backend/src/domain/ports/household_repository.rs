//! Port for households, people and relationships.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    Household, HouseholdDraft, Person, PersonDraft, Relationship, RelationshipDraft, UserId,
};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseholdRepository: Send + Sync {
    async fn create_household(
        &self,
        owner: &UserId,
        draft: &HouseholdDraft,
    ) -> Result<Household, RepositoryError>;

    /// Households ordered by name.
    async fn list_households(&self, owner: &UserId) -> Result<Vec<Household>, RepositoryError>;

    async fn find_household(&self, owner: &UserId, id: Uuid)
    -> Result<Household, RepositoryError>;

    async fn rename_household(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &HouseholdDraft,
    ) -> Result<Household, RepositoryError>;

    /// Delete a household and, through the foreign key, its people.
    async fn delete_household(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Add a person; the household must belong to `owner`.
    async fn create_person(
        &self,
        owner: &UserId,
        household_id: Uuid,
        draft: &PersonDraft,
    ) -> Result<Person, RepositoryError>;

    /// People ordered by last then first name; missing households are `NotFound`.
    async fn list_people(
        &self,
        owner: &UserId,
        household_id: Uuid,
    ) -> Result<Vec<Person>, RepositoryError>;

    async fn find_person(&self, owner: &UserId, id: Uuid) -> Result<Person, RepositoryError>;

    async fn update_person(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &PersonDraft,
    ) -> Result<Person, RepositoryError>;

    async fn delete_person(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Insert a relationship and its inverse in one transaction.
    ///
    /// Returns the forward row. Either person missing is `NotFound`; an
    /// existing pair is `AlreadyExists`.
    async fn create_relationship(
        &self,
        owner: &UserId,
        draft: &RelationshipDraft,
    ) -> Result<Relationship, RepositoryError>;

    /// Relationships where `person_id` is the subject.
    async fn list_relationships(
        &self,
        owner: &UserId,
        person_id: Uuid,
    ) -> Result<Vec<Relationship>, RepositoryError>;

    /// Remove a relationship and its inverse in one transaction.
    async fn delete_relationship(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;
}
