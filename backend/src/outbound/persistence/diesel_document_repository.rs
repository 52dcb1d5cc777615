//! PostgreSQL-backed `DocumentRepository` implementation using Diesel ORM.
//!
//! Links name their target by `(entity_type, entity_id)` without a foreign
//! key. The target must exist and belong to the caller when the link is
//! made, but a link may outlive the record it points at. Deleting a document
//! cascades to its links.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{DocumentRepository, RepositoryError};
use crate::domain::{Document, DocumentDraft, DocumentLink, LinkedEntity, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{delete_owned, owner_id, require_owned};
use super::models::{DocumentFields, DocumentLinkRow, DocumentRow, convert_rows};
use super::pool::DbPool;
use super::schema::{
    bills, document_links, documents, fixed_assets, households, insurance_policies,
    maintenance_tasks, people, plants, recipes, vehicles,
};

const DOCUMENT: &str = "document";
const LINK: &str = "document link";
const HOUSEHOLD: &str = "household";

/// Diesel-backed implementation of the `DocumentRepository` port.
#[derive(Clone)]
pub struct DieselDocumentRepository {
    pool: DbPool,
}

impl DieselDocumentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for DieselDocumentRepository {
    async fn create(
        &self,
        owner: &UserId,
        draft: &DocumentDraft,
    ) -> Result<Document, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(household_id) = draft.household_id {
            require_owned!(&mut conn, households, household_id, owner, HOUSEHOLD);
        }
        diesel::insert_into(documents::table)
            .values((
                documents::id.eq(Uuid::new_v4()),
                documents::user_id.eq(owner),
                DocumentFields::from(draft),
            ))
            .returning(DocumentRow::as_returning())
            .get_result::<DocumentRow>(&mut conn)
            .await
            .map(Document::from)
            .map_err(|err| map_diesel_error(err, DOCUMENT))
    }

    async fn list<'a>(
        &self,
        owner: &UserId,
        category: Option<&'a str>,
    ) -> Result<Vec<Document>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = documents::table
            .filter(documents::user_id.eq(owner_id(owner)))
            .select(DocumentRow::as_select())
            .order((documents::title.asc(), documents::created_at.asc()))
            .into_boxed();
        if let Some(category) = category {
            query = query.filter(documents::category.eq(category));
        }
        let rows = query
            .load::<DocumentRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, DOCUMENT))?;
        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Document, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        documents::table
            .find(id)
            .filter(documents::user_id.eq(owner_id(owner)))
            .select(DocumentRow::as_select())
            .first::<DocumentRow>(&mut conn)
            .await
            .map(Document::from)
            .map_err(|err| map_diesel_error(err, DOCUMENT))
    }

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &DocumentDraft,
    ) -> Result<Document, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        if let Some(household_id) = draft.household_id {
            require_owned!(&mut conn, households, household_id, owner, HOUSEHOLD);
        }
        diesel::update(documents::table.find(id).filter(documents::user_id.eq(owner)))
            .set(DocumentFields::from(draft))
            .returning(DocumentRow::as_returning())
            .get_result::<DocumentRow>(&mut conn)
            .await
            .map(Document::from)
            .map_err(|err| map_diesel_error(err, DOCUMENT))
    }

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, documents, id, owner_id(owner), DOCUMENT)
    }

    async fn link(
        &self,
        owner: &UserId,
        document_id: Uuid,
        entity_type: LinkedEntity,
        entity_id: Uuid,
    ) -> Result<DocumentLink, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, documents, document_id, owner, DOCUMENT);
        match entity_type {
            LinkedEntity::Person => {
                require_owned!(&mut conn, people, entity_id, owner, "person");
            }
            LinkedEntity::Vehicle => {
                require_owned!(&mut conn, vehicles, entity_id, owner, "vehicle");
            }
            LinkedEntity::InsurancePolicy => {
                require_owned!(&mut conn, insurance_policies, entity_id, owner, "insurance policy");
            }
            LinkedEntity::Bill => {
                require_owned!(&mut conn, bills, entity_id, owner, "bill");
            }
            LinkedEntity::MaintenanceTask => {
                require_owned!(&mut conn, maintenance_tasks, entity_id, owner, "maintenance task");
            }
            LinkedEntity::Plant => {
                require_owned!(&mut conn, plants, entity_id, owner, "plant");
            }
            LinkedEntity::FixedAsset => {
                require_owned!(&mut conn, fixed_assets, entity_id, owner, "fixed asset");
            }
            LinkedEntity::Recipe => {
                require_owned!(&mut conn, recipes, entity_id, owner, "recipe");
            }
        }
        diesel::insert_into(document_links::table)
            .values((
                document_links::id.eq(Uuid::new_v4()),
                document_links::user_id.eq(owner),
                document_links::document_id.eq(document_id),
                document_links::entity_type.eq(entity_type.as_str()),
                document_links::entity_id.eq(entity_id),
            ))
            .returning(DocumentLinkRow::as_returning())
            .get_result::<DocumentLinkRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, LINK))?
            .try_into()
    }

    async fn list_links(
        &self,
        owner: &UserId,
        document_id: Uuid,
    ) -> Result<Vec<DocumentLink>, RepositoryError> {
        let owner = owner_id(owner);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        require_owned!(&mut conn, documents, document_id, owner, DOCUMENT);
        let rows = document_links::table
            .filter(document_links::document_id.eq(document_id))
            .filter(document_links::user_id.eq(owner))
            .order(document_links::created_at.asc())
            .select(DocumentLinkRow::as_select())
            .load::<DocumentLinkRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, LINK))?;
        convert_rows(rows)
    }

    async fn unlink(&self, owner: &UserId, link_id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, document_links, link_id, owner_id(owner), LINK)
    }

    async fn linked_documents(
        &self,
        owner: &UserId,
        entity_type: LinkedEntity,
        entity_id: Uuid,
    ) -> Result<Vec<Document>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = document_links::table
            .inner_join(documents::table)
            .filter(document_links::user_id.eq(owner_id(owner)))
            .filter(document_links::entity_type.eq(entity_type.as_str()))
            .filter(document_links::entity_id.eq(entity_id))
            .order(documents::title.asc())
            .select(DocumentRow::as_select())
            .load::<DocumentRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, DOCUMENT))?;
        Ok(rows.into_iter().map(Document::from).collect())
    }
}
