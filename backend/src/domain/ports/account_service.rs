//! Driving port for registration, login and profile lookups.
//!
//! Inbound adapters call it without knowing how accounts are stored, so HTTP
//! handler tests can substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account; a taken e-mail is a conflict.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Validate credentials. Unknown e-mails and wrong passwords fail alike.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Current profile of an authenticated user.
    async fn profile(&self, user_id: &UserId) -> Result<User, Error>;
}
