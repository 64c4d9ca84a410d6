//! Driving port for account registration and authentication.
//!
//! Inbound adapters call it to create accounts, check credentials and resolve
//! the user behind a session without importing persistence or hashing code.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

/// Message returned for every rejected login attempt.
pub const LOGIN_FAILED_MESSAGE: &str = "No user found with that username, or password invalid.";

/// Message returned when registration hits an existing email or name.
pub const ACCOUNT_EXISTS_MESSAGE: &str = "Username or Email address already exists!";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account. The first account registered becomes the admin.
    ///
    /// Fails with `Conflict` when the email or display name is taken.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Check credentials; the identifier may be a display name or an email.
    ///
    /// Every failure is reported as `Unauthorized` with
    /// [`LOGIN_FAILED_MESSAGE`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Resolve the user a session refers to. Unknown ids yield `None`.
    async fn current_user(&self, id: UserId) -> Result<Option<User>, Error>;
}
