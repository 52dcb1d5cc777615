//! Account rows.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::{RepositoryError, StoredCredentials};
use crate::domain::{DisplayName, Email, PasswordHash, User, UserId};

use super::super::schema::users;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    fn user(&self) -> Result<User, RepositoryError> {
        let email = Email::new(&self.email)
            .map_err(|err| RepositoryError::query(format!("stored email invalid: {err}")))?;
        let display_name = DisplayName::new(self.display_name.clone())
            .map_err(|err| RepositoryError::query(format!("stored display name invalid: {err}")))?;
        Ok(User {
            id: UserId::from_uuid(self.id),
            email,
            display_name,
            created_at: self.created_at,
        })
    }
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        row.user()
    }
}

impl TryFrom<UserRow> for StoredCredentials {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user: row.user()?,
            password_hash: PasswordHash::from_encoded(row.password_hash),
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub password_hash: &'a str,
}
