//! Port for document references and their links.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Document, DocumentDraft, DocumentLink, LinkedEntity, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a document; a repeated Paperless id is `AlreadyExists`.
    async fn create(
        &self,
        owner: &UserId,
        draft: &DocumentDraft,
    ) -> Result<Document, RepositoryError>;

    /// Documents ordered by title, optionally restricted to one category.
    async fn list<'a>(
        &self,
        owner: &UserId,
        category: Option<&'a str>,
    ) -> Result<Vec<Document>, RepositoryError>;

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<Document, RepositoryError>;

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &DocumentDraft,
    ) -> Result<Document, RepositoryError>;

    /// Delete a document and its links.
    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Attach a document to a record; an existing link is `AlreadyExists`.
    async fn link(
        &self,
        owner: &UserId,
        document_id: Uuid,
        entity_type: LinkedEntity,
        entity_id: Uuid,
    ) -> Result<DocumentLink, RepositoryError>;

    async fn list_links(
        &self,
        owner: &UserId,
        document_id: Uuid,
    ) -> Result<Vec<DocumentLink>, RepositoryError>;

    async fn unlink(&self, owner: &UserId, link_id: Uuid) -> Result<(), RepositoryError>;

    /// Documents linked to one record.
    async fn linked_documents(
        &self,
        owner: &UserId,
        entity_type: LinkedEntity,
        entity_id: Uuid,
    ) -> Result<Vec<Document>, RepositoryError>;
}
