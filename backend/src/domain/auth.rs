//! Authentication primitives: login credentials and registration requests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use zeroize::Zeroizing;

use super::user::{DisplayName, Email, UserValidationError};

/// Minimum accepted password length for new accounts.
pub const PASSWORD_MIN: usize = 8;
/// Maximum accepted password length.
pub const PASSWORD_MAX: usize = 128;

/// Domain error returned when login or registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthValidationError {
    /// The e-mail address failed validation.
    #[error("{0}")]
    Email(UserValidationError),
    /// The display name failed validation.
    #[error("{0}")]
    DisplayName(UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
    /// Password is shorter than [`PASSWORD_MIN`].
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    /// Password is longer than [`PASSWORD_MAX`].
    #[error("password must be at most {max} characters")]
    PasswordTooLong { max: usize },
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised by [`Email::new`].
/// - `password` is non-empty but retains caller-provided whitespace.
///
/// # Examples
/// ```
/// use wellf::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@example.com", "hunter22").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw e-mail/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = Email::new(email).map_err(AuthValidationError::Email)?;
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised e-mail used for the account lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated request to create a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: Email,
    display_name: DisplayName,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate registration inputs, enforcing the password length policy.
    pub fn try_from_parts(
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<Self, AuthValidationError> {
        let email = Email::new(email).map_err(AuthValidationError::Email)?;
        let display_name =
            DisplayName::new(display_name.trim()).map_err(AuthValidationError::DisplayName)?;
        let length = password.chars().count();
        if length == 0 {
            return Err(AuthValidationError::EmptyPassword);
        }
        if length < PASSWORD_MIN {
            return Err(AuthValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(AuthValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        Ok(Self {
            email,
            display_name,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised account e-mail.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Requested display name.
    pub fn display_name(&self) -> &DisplayName {
        &self.display_name
    }

    /// Plain-text password, hashed before it reaches persistence.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
