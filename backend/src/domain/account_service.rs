//! Account service implementing the [`AccountService`] driving port.
//!
//! Argon2 hashing and verification are CPU bound, so both run on the blocking
//! thread pool rather than on the request's worker.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{AccountService, NewUser, RepositoryError, UserRepository};
use crate::domain::{Error, LoginCredentials, PasswordHash, Registration, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Registration and login backed by a [`UserRepository`].
#[derive(Clone)]
pub struct UserAccountService<R> {
    users: Arc<R>,
}

impl<R> UserAccountService<R> {
    /// Create a service over the given user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

async fn hash_password(password: String) -> Result<PasswordHash, Error> {
    tokio::task::spawn_blocking(move || PasswordHash::generate(&password))
        .await
        .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
        .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
}

async fn verify_password(hash: PasswordHash, password: String) -> Result<bool, Error> {
    tokio::task::spawn_blocking(move || hash.verify(&password))
        .await
        .map_err(|err| Error::internal(format!("password verification task failed: {err}")))
}

#[async_trait]
impl<R> AccountService for UserAccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let password_hash = hash_password(registration.password().to_owned()).await?;
        let new_user = NewUser {
            email: registration.email().clone(),
            display_name: registration.display_name().clone(),
            password_hash,
        };
        let user = self.users.create(&new_user).await.map_err(|err| match err {
            RepositoryError::AlreadyExists { .. } => {
                Error::conflict("an account with this email already exists")
            }
            other => Error::from(other),
        })?;
        info!(user_id = %user.id, "account registered");
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(stored) = self.users.find_credentials(credentials.email()).await? else {
            debug!("login attempted for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        if !verify_password(stored.password_hash, credentials.password().to_owned()).await? {
            debug!(user_id = %stored.user.id, "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(stored.user)
    }

    async fn profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
