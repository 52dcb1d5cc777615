//! Households, the people in them and the family relationships between
//! those people.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use uuid::Uuid;

use super::labels::labelled_enum;
use super::user::{Email, UserId};
use super::validation::{FieldViolation, optional_text, required_text};

const NAME_MAX: usize = 120;
const NOTES_MAX: usize = 4_000;
const PHONE_MAX: usize = 40;

/// Tenancy grouping of people, vehicles, documents and policies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Household {
    pub id: Uuid,
    pub owner: UserId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied household fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdDraft {
    pub name: String,
}

impl HouseholdDraft {
    pub fn new(name: &str) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: required_text("name", name, NAME_MAX)?,
        })
    }
}

/// Member of a household.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
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

impl Person {
    /// Age in completed years on `today`, if the date of birth is known.
    ///
    /// A date of birth in the future yields `None`.
    pub fn age(&self, today: NaiveDate) -> Option<u32> {
        let born = self.date_of_birth?;
        let mut years = today.year() - born.year();
        if (today.month(), today.day()) < (born.month(), born.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Caller-supplied person fields, normalised.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonDraft {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl PersonDraft {
    /// Trim names and optional fields, normalising the e-mail address.
    pub fn validated(self) -> Result<Self, FieldViolation> {
        let email = optional_text("email", self.email.as_deref(), super::user::EMAIL_MAX)?
            .map(|raw| {
                Email::new(&raw)
                    .map(|email| email.as_ref().to_owned())
                    .map_err(|err| FieldViolation::new("email", "invalid", err.to_string()))
            })
            .transpose()?;
        Ok(Self {
            first_name: required_text("firstName", &self.first_name, NAME_MAX)?,
            last_name: required_text("lastName", &self.last_name, NAME_MAX)?,
            date_of_birth: self.date_of_birth,
            email,
            phone: optional_text("phone", self.phone.as_deref(), PHONE_MAX)?,
            notes: optional_text("notes", self.notes.as_deref(), NOTES_MAX)?,
        })
    }
}

labelled_enum! {
    /// Family relationship from one person to another.
    pub enum RelationshipKind as "relationship kind" {
        Parent => "parent",
        Child => "child",
        Spouse => "spouse",
        Partner => "partner",
        Sibling => "sibling",
        Grandparent => "grandparent",
        Grandchild => "grandchild",
        Guardian => "guardian",
        Ward => "ward",
    }
}

impl RelationshipKind {
    /// Relationship seen from the other person.
    pub fn inverse(self) -> Self {
        match self {
            Self::Parent => Self::Child,
            Self::Child => Self::Parent,
            Self::Spouse => Self::Spouse,
            Self::Partner => Self::Partner,
            Self::Sibling => Self::Sibling,
            Self::Grandparent => Self::Grandchild,
            Self::Grandchild => Self::Grandparent,
            Self::Guardian => Self::Ward,
            Self::Ward => Self::Guardian,
        }
    }
}

/// Directed relationship row; every relationship is stored with its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: Uuid,
    pub person_id: Uuid,
    pub related_person_id: Uuid,
    pub kind: RelationshipKind,
    pub created_at: DateTime<Utc>,
}

/// Validated request to relate two people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipDraft {
    pub person_id: Uuid,
    pub related_person_id: Uuid,
    pub kind: RelationshipKind,
}

impl RelationshipDraft {
    /// Reject relating a person to themselves.
    pub fn new(
        person_id: Uuid,
        related_person_id: Uuid,
        kind: RelationshipKind,
    ) -> Result<Self, FieldViolation> {
        if person_id == related_person_id {
            return Err(FieldViolation::new(
                "relatedPersonId",
                "self_relationship",
                "a person cannot be related to themselves",
            ));
        }
        Ok(Self {
            person_id,
            related_person_id,
            kind,
        })
    }

    /// The same relationship seen from the related person.
    pub fn inverse(&self) -> Self {
        Self {
            person_id: self.related_person_id,
            related_person_id: self.person_id,
            kind: self.kind.inverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn person(date_of_birth: Option<NaiveDate>) -> Person {
        Person {
            id: Uuid::new_v4(),
            household_id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            date_of_birth,
            email: None,
            phone: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(date(1990, 3, 15), date(2026, 3, 15), Some(36))]
    #[case(date(1990, 3, 16), date(2026, 3, 15), Some(35))]
    #[case(date(2000, 2, 29), date(2026, 2, 28), Some(25))]
    #[case(date(2030, 1, 1), date(2026, 3, 15), None)]
    fn age_counts_completed_years(
        #[case] born: NaiveDate,
        #[case] today: NaiveDate,
        #[case] expected: Option<u32>,
    ) {
        assert_eq!(person(Some(born)).age(today), expected);
    }

    #[test]
    fn age_is_unknown_without_birth_date() {
        assert_eq!(person(None).age(date(2026, 1, 1)), None);
    }

    #[test]
    fn inverse_is_an_involution() {
        for kind in RelationshipKind::ALL {
            assert_eq!(kind.inverse().inverse(), *kind);
        }
        assert_eq!(RelationshipKind::Guardian.inverse(), RelationshipKind::Ward);
    }

    #[test]
    fn self_relationship_is_rejected() {
        let id = Uuid::new_v4();
        let err = RelationshipDraft::new(id, id, RelationshipKind::Sibling).expect_err("self");
        assert_eq!(err.code(), "self_relationship");
    }

    #[test]
    fn draft_inverse_swaps_people() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let draft = RelationshipDraft::new(a, b, RelationshipKind::Parent).expect("valid");
        let inverse = draft.inverse();
        assert_eq!(inverse.person_id, b);
        assert_eq!(inverse.related_person_id, a);
        assert_eq!(inverse.kind, RelationshipKind::Child);
    }

    #[test]
    fn person_draft_normalises_fields() {
        let draft = PersonDraft {
            first_name: " Ada ".into(),
            last_name: "Lovelace".into(),
            email: Some(" ADA@Example.com ".into()),
            phone: Some("   ".into()),
            ..PersonDraft::default()
        }
        .validated()
        .expect("valid person");
        assert_eq!(draft.first_name, "Ada");
        assert_eq!(draft.email.as_deref(), Some("ada@example.com"));
        assert_eq!(draft.phone, None);
    }

    #[test]
    fn person_draft_rejects_bad_email() {
        let err = PersonDraft {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: Some("nope".into()),
            ..PersonDraft::default()
        }
        .validated()
        .expect_err("invalid email");
        assert_eq!(err.field(), "email");
    }
}
