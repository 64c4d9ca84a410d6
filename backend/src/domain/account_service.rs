//! Account registration and authentication service.
//!
//! Implements [`AccountCommand`] over the credential store and a password
//! hasher. The first account ever registered becomes the admin.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    ACCOUNT_EXISTS_MESSAGE, AccountCommand, LOGIN_FAILED_MESSAGE, PasswordHashError,
    PasswordHasher, UserPersistenceError, UserRepository,
};
use crate::domain::{
    DisplayName, EmailAddress, Error, LoginCredentials, NewUser, Registration, Role, User,
    UserId, gravatar_url,
};

/// Account service implementing the account driving port.
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Create a new service over the given store and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate => Error::conflict(ACCOUNT_EXISTS_MESSAGE),
        UserPersistenceError::AdminExists => {
            Error::internal("unexpected admin uniqueness violation")
        }
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn lookup(&self, identifier: &str) -> Result<Option<User>, Error> {
        let by_name = self
            .users
            .find_by_display_name(&DisplayName::lookup_key(identifier))
            .await
            .map_err(map_user_error)?;
        if by_name.is_some() {
            return Ok(by_name);
        }
        self.users
            .find_by_email(&EmailAddress::lookup_key(identifier))
            .await
            .map_err(map_user_error)
    }

    async fn ensure_unique(&self, registration: &Registration) -> Result<(), Error> {
        let name_taken = self
            .users
            .find_by_display_name(registration.display_name().as_ref())
            .await
            .map_err(map_user_error)?
            .is_some();
        let email_taken = self
            .users
            .find_by_email(registration.email().as_ref())
            .await
            .map_err(map_user_error)?
            .is_some();
        if name_taken || email_taken {
            return Err(Error::conflict(ACCOUNT_EXISTS_MESSAGE));
        }
        Ok(())
    }

    fn login_failed() -> Error {
        Error::unauthorized(LOGIN_FAILED_MESSAGE)
    }
}

#[async_trait]
impl<U, H> AccountCommand for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        self.ensure_unique(&registration).await?;

        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(|err| Error::internal(err.to_string()))?;
        let role = if self.users.any_exists().await.map_err(map_user_error)? {
            Role::Member
        } else {
            Role::Admin
        };
        let new_user = NewUser {
            avatar_url: gravatar_url(registration.email()),
            email: registration.email().clone(),
            display_name: registration.display_name().clone(),
            password_hash,
            role,
        };

        let user = match self.users.insert(new_user.clone()).await {
            // Lost the race for the admin slot; register as a member instead.
            Err(UserPersistenceError::AdminExists) => self
                .users
                .insert(NewUser {
                    role: Role::Member,
                    ..new_user
                })
                .await
                .map_err(map_user_error)?,
            other => other.map_err(map_user_error)?,
        };

        info!(
            user_id = %user.id(),
            role = user.role().as_str(),
            "registered account"
        );
        Ok(user)
    }

    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(user) = self.lookup(credentials.identifier()).await? else {
            info!("login rejected: unknown identifier");
            return Err(Self::login_failed());
        };

        match self
            .hasher
            .verify(credentials.password(), user.password_hash())
        {
            Ok(true) => {
                info!(user_id = %user.id(), "login succeeded");
                Ok(user)
            }
            Ok(false) => {
                info!(user_id = %user.id(), "login rejected: wrong password");
                Err(Self::login_failed())
            }
            Err(PasswordHashError::Malformed { message }) => {
                warn!(user_id = %user.id(), %message, "stored password hash is malformed");
                Err(Self::login_failed())
            }
            Err(err @ PasswordHashError::Hash { .. }) => Err(Error::internal(err.to_string())),
        }
    }

    async fn current_user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPasswordHasher, MockUserRepository};
    use crate::domain::{ErrorCode, PasswordHash, RegistrationInput};
    use crate::outbound::memory::InMemoryBlogStore;
    use rstest::{fixture, rstest};

    struct PlainHasher;

    impl PasswordHasher for PlainHasher {
        fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
            Ok(PasswordHash::new(format!("plain${password}")))
        }

        fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHashError> {
            hash.as_ref()
                .strip_prefix("plain$")
                .map(|stored| stored == password)
                .ok_or_else(|| PasswordHashError::malformed("missing plain$ prefix"))
        }
    }

    type Service = AccountService<InMemoryBlogStore, PlainHasher>;

    #[fixture]
    fn service() -> Service {
        AccountService::new(Arc::new(InMemoryBlogStore::new()), Arc::new(PlainHasher))
    }

    fn registration(username: &str, email: &str) -> Registration {
        Registration::try_from_input(RegistrationInput {
            username,
            email,
            password: "secret1",
            confirm_password: "secret1",
        })
        .expect("valid registration")
    }

    #[rstest]
    #[tokio::test]
    async fn first_account_is_admin_and_later_ones_are_members(service: Service) {
        let alice = service
            .register(registration("alice", "alice@x.com"))
            .await
            .expect("alice registers");
        let bob = service
            .register(registration("bobby", "bob@y.org"))
            .await
            .expect("bob registers");

        assert_eq!(alice.role(), Role::Admin);
        assert_eq!(bob.role(), Role::Member);
        assert_eq!(alice.avatar_url(), gravatar_url(alice.email()));
    }

    #[rstest]
    #[case("alice", "ALICE@x.com")]
    #[case("ALICE", "other@x.com")]
    #[tokio::test]
    async fn duplicate_email_or_name_conflicts(
        service: Service,
        #[case] username: &str,
        #[case] email: &str,
    ) {
        service
            .register(registration("alice", "alice@x.com"))
            .await
            .expect("first registration");

        let err = service
            .register(registration(username, email))
            .await
            .expect_err("duplicate must fail");
        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), ACCOUNT_EXISTS_MESSAGE);
    }

    #[rstest]
    #[case("Alice")]
    #[case("alice")]
    #[case("ALICE@X.COM")]
    #[tokio::test]
    async fn authenticates_by_name_or_email(service: Service, #[case] identifier: &str) {
        let registered = service
            .register(registration("alice", "alice@x.com"))
            .await
            .expect("registration");

        let creds = LoginCredentials::try_from_parts(identifier, "secret1").expect("creds");
        let user = service.authenticate(&creds).await.expect("login succeeds");
        assert_eq!(user.id(), registered.id());
    }

    #[rstest]
    #[case("alice", "wrong")]
    #[case("nobody", "secret1")]
    #[tokio::test]
    async fn rejected_logins_share_one_message(
        service: Service,
        #[case] identifier: &str,
        #[case] password: &str,
    ) {
        service
            .register(registration("alice", "alice@x.com"))
            .await
            .expect("registration");

        let creds = LoginCredentials::try_from_parts(identifier, password).expect("creds");
        let err = service.authenticate(&creds).await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), LOGIN_FAILED_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_stored_hash_is_a_failed_login() {
        let stored = NewUser {
            email: EmailAddress::new("alice@x.com").expect("email"),
            display_name: DisplayName::new("alice").expect("name"),
            password_hash: PasswordHash::new("garbage"),
            avatar_url: String::new(),
            role: Role::Admin,
        }
        .into_user(UserId::new(1));
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_display_name()
            .withf(|name| name == "Alice")
            .return_once(move |_| Ok(Some(stored)));
        let service = AccountService::new(Arc::new(users), Arc::new(PlainHasher));

        let creds = LoginCredentials::try_from_parts("alice", "secret1").expect("creds");
        let err = service.authenticate(&creds).await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn store_race_on_admin_slot_falls_back_to_member() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_display_name().returning(|_| Ok(None));
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_any_exists().return_once(|| Ok(false));
        let mut seq = mockall::Sequence::new();
        users
            .expect_insert()
            .withf(|user| user.role == Role::Admin)
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_| Err(UserPersistenceError::admin_exists()));
        users
            .expect_insert()
            .withf(|user| user.role == Role::Member)
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|user| Ok(user.into_user(UserId::new(2))));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .return_once(|_| Ok(PasswordHash::new("hashed")));
        let service = AccountService::new(Arc::new(users), Arc::new(hasher));

        let user = service
            .register(registration("bobby", "bob@y.org"))
            .await
            .expect("registration");
        assert_eq!(user.role(), Role::Member);
    }

    #[rstest]
    #[tokio::test]
    async fn store_unique_violation_maps_to_conflict() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_display_name().returning(|_| Ok(None));
        users.expect_find_by_email().returning(|_| Ok(None));
        users.expect_any_exists().return_once(|| Ok(true));
        users
            .expect_insert()
            .return_once(|_| Err(UserPersistenceError::duplicate()));
        let service = AccountService::new(Arc::new(users), Arc::new(PlainHasher));

        let err = service
            .register(registration("bobby", "bob@y.org"))
            .await
            .expect_err("store rejects");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_are_unavailable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(|_| Err(UserPersistenceError::connection("refused")));
        let service = AccountService::new(Arc::new(users), Arc::new(PlainHasher));

        let err = service
            .current_user(UserId::new(1))
            .await
            .expect_err("store down");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_session_user_resolves_to_none(service: Service) {
        let user = service
            .current_user(UserId::new(42))
            .await
            .expect("lookup succeeds");
        assert!(user.is_none());
    }
}
