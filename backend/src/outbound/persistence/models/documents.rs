//! Document and document link rows.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{Document, DocumentDraft, DocumentLink};

use super::super::schema::{document_links, documents};
use super::parse_label;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocumentRow {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub title: String,
    pub paperless_document_id: Option<i64>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            household_id: row.household_id,
            title: row.title,
            paperless_document_id: row.paperless_document_id,
            category: row.category,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = documents, treat_none_as_null = true)]
pub(crate) struct DocumentFields<'a> {
    pub household_id: Option<Uuid>,
    pub title: &'a str,
    pub paperless_document_id: Option<i64>,
    pub category: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a DocumentDraft> for DocumentFields<'a> {
    fn from(draft: &'a DocumentDraft) -> Self {
        Self {
            household_id: draft.household_id,
            title: &draft.title,
            paperless_document_id: draft.paperless_document_id,
            category: draft.category.as_deref(),
            notes: draft.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = document_links)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocumentLinkRow {
    pub id: Uuid,
    pub document_id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DocumentLinkRow> for DocumentLink {
    type Error = RepositoryError;

    fn try_from(row: DocumentLinkRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            document_id: row.document_id,
            entity_type: parse_label(&row.entity_type)?,
            entity_id: row.entity_id,
            created_at: row.created_at,
        })
    }
}
