//! PostgreSQL-backed `SnippetRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, SnippetRepository};
use crate::domain::{CodeSnippet, SnippetDraft, SnippetFilter, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::diesel_helpers::{contains_pattern, delete_owned, owner_id};
use super::models::{SnippetFields, SnippetRow};
use super::pool::DbPool;
use super::schema::code_snippets;

const SNIPPET: &str = "code snippet";

/// Diesel-backed implementation of the `SnippetRepository` port.
#[derive(Clone)]
pub struct DieselSnippetRepository {
    pool: DbPool,
}

impl DieselSnippetRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnippetRepository for DieselSnippetRepository {
    async fn create(
        &self,
        owner: &UserId,
        draft: &SnippetDraft,
    ) -> Result<CodeSnippet, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(code_snippets::table)
            .values((
                code_snippets::id.eq(Uuid::new_v4()),
                code_snippets::user_id.eq(owner_id(owner)),
                SnippetFields::from(draft),
            ))
            .returning(SnippetRow::as_returning())
            .get_result::<SnippetRow>(&mut conn)
            .await
            .map(CodeSnippet::from)
            .map_err(|err| map_diesel_error(err, SNIPPET))
    }

    async fn list(
        &self,
        owner: &UserId,
        filter: &SnippetFilter,
    ) -> Result<Vec<CodeSnippet>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = code_snippets::table
            .filter(code_snippets::user_id.eq(owner_id(owner)))
            .select(SnippetRow::as_select())
            .order(code_snippets::updated_at.desc())
            .into_boxed();
        if let Some(language) = filter.language.as_deref() {
            query = query.filter(code_snippets::language.eq(language.to_owned()));
        }
        if let Some(tag) = filter.tag.as_deref() {
            query = query.filter(code_snippets::tags.contains(vec![tag.to_owned()]));
        }
        if let Some(needle) = filter.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = contains_pattern(needle);
            query = query.filter(
                code_snippets::title
                    .ilike(pattern.clone())
                    .or(code_snippets::description.ilike(pattern)),
            );
        }
        let rows = query
            .load::<SnippetRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, SNIPPET))?;
        Ok(rows.into_iter().map(CodeSnippet::from).collect())
    }

    async fn find(&self, owner: &UserId, id: Uuid) -> Result<CodeSnippet, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        code_snippets::table
            .find(id)
            .filter(code_snippets::user_id.eq(owner_id(owner)))
            .select(SnippetRow::as_select())
            .first::<SnippetRow>(&mut conn)
            .await
            .map(CodeSnippet::from)
            .map_err(|err| map_diesel_error(err, SNIPPET))
    }

    async fn update(
        &self,
        owner: &UserId,
        id: Uuid,
        draft: &SnippetDraft,
    ) -> Result<CodeSnippet, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            code_snippets::table
                .find(id)
                .filter(code_snippets::user_id.eq(owner_id(owner))),
        )
        .set((
            SnippetFields::from(draft),
            code_snippets::updated_at.eq(diesel::dsl::now),
        ))
        .returning(SnippetRow::as_returning())
        .get_result::<SnippetRow>(&mut conn)
        .await
        .map(CodeSnippet::from)
        .map_err(|err| map_diesel_error(err, SNIPPET))
    }

    async fn delete(&self, owner: &UserId, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        delete_owned!(&mut conn, code_snippets, id, owner_id(owner), SNIPPET)
    }

    async fn languages(&self, owner: &UserId) -> Result<Vec<String>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        code_snippets::table
            .filter(code_snippets::user_id.eq(owner_id(owner)))
            .select(code_snippets::language)
            .distinct()
            .order(code_snippets::language.asc())
            .load::<String>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, SNIPPET))
    }
}
