//! Saved code snippets.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::meals::normalise_tags;
use super::validation::{FieldViolation, optional_text, required_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSnippet {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetDraft {
    pub title: String,
    pub language: String,
    pub code: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
}

/// Longest accepted snippet body in characters.
pub const CODE_MAX: usize = 100_000;

impl SnippetDraft {
    /// Languages are lower-cased; code keeps its whitespace but may not be
    /// blank.
    pub fn validated(self) -> Result<Self, FieldViolation> {
        if self.code.trim().is_empty() {
            return Err(FieldViolation::required("code"));
        }
        if self.code.chars().count() > CODE_MAX {
            return Err(FieldViolation::too_long("code", CODE_MAX));
        }
        Ok(Self {
            title: required_text("title", &self.title, 200)?,
            language: required_text("language", &self.language, 40)?.to_lowercase(),
            description: optional_text("description", self.description.as_deref(), 2_000)?,
            tags: normalise_tags(&self.tags),
            ..self
        })
    }
}

/// Snippet listing filters, all optional and combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetFilter {
    pub language: Option<String>,
    pub tag: Option<String>,
    pub q: Option<String>,
}
