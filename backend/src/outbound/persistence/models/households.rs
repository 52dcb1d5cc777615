//! Household, person and relationship rows.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::RepositoryError;
use crate::domain::{Household, Person, PersonDraft, Relationship, UserId};

use super::super::schema::{households, people, person_relationships};
use super::parse_label;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = households)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HouseholdRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<HouseholdRow> for Household {
    fn from(row: HouseholdRow) -> Self {
        Self {
            id: row.id,
            owner: UserId::from_uuid(row.user_id),
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = people)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PersonRow {
    pub id: Uuid,
    pub household_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Self {
            id: row.id,
            household_id: row.household_id,
            first_name: row.first_name,
            last_name: row.last_name,
            date_of_birth: row.date_of_birth,
            email: row.email,
            phone: row.phone,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = people, treat_none_as_null = true)]
pub(crate) struct PersonFields<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a PersonDraft> for PersonFields<'a> {
    fn from(draft: &'a PersonDraft) -> Self {
        Self {
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            date_of_birth: draft.date_of_birth,
            email: draft.email.as_deref(),
            phone: draft.phone.as_deref(),
            notes: draft.notes.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = person_relationships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RelationshipRow {
    pub id: Uuid,
    pub person_id: Uuid,
    pub related_person_id: Uuid,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<RelationshipRow> for Relationship {
    type Error = RepositoryError;

    fn try_from(row: RelationshipRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            person_id: row.person_id,
            related_person_id: row.related_person_id,
            kind: parse_label(&row.kind)?,
            created_at: row.created_at,
        })
    }
}
