//! Port abstraction for the credential store and its errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email address or display name is already registered.
        Duplicate => "user with that email address or display name already exists",
        /// An admin account already exists.
        AdminExists => "an admin account already exists",
    }
}

/// Credential store.
///
/// Lookup keys are expected in normalised form: emails lowercased, display
/// names title-cased.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned id.
    ///
    /// Uniqueness of email and display name is enforced by the store itself;
    /// a clash yields [`UserPersistenceError::Duplicate`]. Inserting a second
    /// admin yields [`UserPersistenceError::AdminExists`].
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by normalised email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by normalised display name.
    async fn find_by_display_name(
        &self,
        display_name: &str,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Whether any account has been registered yet.
    async fn any_exists(&self) -> Result<bool, UserPersistenceError>;
}
