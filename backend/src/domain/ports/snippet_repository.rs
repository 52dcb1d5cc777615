//! Port for code snippets.
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{CodeSnippet, SnippetDraft, SnippetFilter, UserId};

use super::RepositoryError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnippetRepository: Send + Sync {
    async fn create(
        &self,
        owner: &UserId,
        draft: &SnippetDraft,
    ) -> Result<CodeSnippet, RepositoryError>;

    /// Snippets matching every filter, most recently updated first.
    async fn list(
        &self,
        owner: &UserId,
        filter: &SnippetFilter,
    ) -> Result<Vec<CodeSnippet>, RepositoryError>;

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<CodeSnippet, RepositoryError>;

    /// Replace a snippet's fields and bump `updated_at`.
    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &SnippetDraft,
    ) -> Result<CodeSnippet, RepositoryError>;

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError>;

    /// Distinct languages in use, alphabetical.
    async fn languages(&self, owner: &UserId) -> Result<Vec<String>, RepositoryError>;
}
