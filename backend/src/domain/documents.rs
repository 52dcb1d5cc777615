//! Document references and their links to other records.
//!
//! Document bodies live in an external Paperless-ngx store; only its numeric
//! document id is kept here.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::labels::labelled_enum;
use super::validation::{FieldViolation, optional_text, required_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: Uuid,
    pub household_id: Option<Uuid>,
    pub title: String,
    pub paperless_document_id: Option<i64>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDraft {
    pub household_id: Option<Uuid>,
    pub title: String,
    pub paperless_document_id: Option<i64>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

impl DocumentDraft {
    /// Categories are lower-cased so filtering ignores case.
    pub fn validated(self) -> Result<Self, FieldViolation> {
        if self.paperless_document_id.is_some_and(|id| id <= 0) {
            return Err(FieldViolation::out_of_range(
                "paperlessDocumentId",
                1,
                i64::MAX,
            ));
        }
        Ok(Self {
            title: required_text("title", &self.title, 300)?,
            category: optional_text("category", self.category.as_deref(), 60)?
                .map(|category| category.to_lowercase()),
            notes: optional_text("notes", self.notes.as_deref(), 4_000)?,
            ..self
        })
    }
}

labelled_enum! {
    /// Kinds of record a document can be attached to.
    pub enum LinkedEntity as "entity type" {
        Person => "person",
        Vehicle => "vehicle",
        InsurancePolicy => "insurance_policy",
        Bill => "bill",
        MaintenanceTask => "maintenance_task",
        Plant => "plant",
        FixedAsset => "fixed_asset",
        Recipe => "recipe",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLink {
    pub id: Uuid,
    pub document_id: Uuid,
    pub entity_type: LinkedEntity,
    pub entity_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> DocumentDraft {
        DocumentDraft {
            household_id: None,
            title: " Home insurance schedule ".into(),
            paperless_document_id: Some(42),
            category: Some(" Insurance ".into()),
            notes: None,
        }
    }

    #[test]
    fn draft_is_normalised() {
        let draft = draft().validated().expect("valid document");
        assert_eq!(draft.title, "Home insurance schedule");
        assert_eq!(draft.category.as_deref(), Some("insurance"));
    }

    #[test]
    fn paperless_id_must_be_positive() {
        let mut bad = draft();
        bad.paperless_document_id = Some(0);
        assert_eq!(
            bad.validated().expect_err("zero id").field(),
            "paperlessDocumentId"
        );
    }

    #[test]
    fn entity_labels_parse() {
        assert_eq!(
            "insurance_policy".parse::<LinkedEntity>(),
            Ok(LinkedEntity::InsurancePolicy)
        );
        assert!("spaceship".parse::<LinkedEntity>().is_err());
    }
}
