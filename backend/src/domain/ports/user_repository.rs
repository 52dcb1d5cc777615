//! Port abstraction for account persistence.
use async_trait::async_trait;

use crate::domain::{DisplayName, Email, PasswordHash, User, UserId};

use super::RepositoryError;

/// Account fields written at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: Email,
    pub display_name: DisplayName,
    pub password_hash: PasswordHash,
}

/// A user together with their stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: PasswordHash,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account; a taken e-mail is `AlreadyExists`.
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Fetch the account and password hash registered under `email`.
    async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<StoredCredentials>, RepositoryError>;
}
