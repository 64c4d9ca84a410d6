//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    DisplayName, EmailAddress, NewUser, PasswordHash, Role, User, UserId, UserValidationError,
};

use super::diesel_error_mapping::StoreFailure;
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

const SINGLE_ADMIN_CONSTRAINT: &str = "users_single_admin";

/// Diesel implementation of the credential store.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> UserPersistenceError {
    match failure.into() {
        StoreFailure::Connection(message) => UserPersistenceError::connection(message),
        StoreFailure::Unique(Some(name)) if name == SINGLE_ADMIN_CONSTRAINT => {
            UserPersistenceError::admin_exists()
        }
        StoreFailure::Unique(_) => UserPersistenceError::duplicate(),
        StoreFailure::ForeignKey => UserPersistenceError::query("unexpected foreign key violation"),
        StoreFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    let invalid = move |err: UserValidationError| {
        warn!(user_id = id, error = %err, "stored user row failed validation");
        UserPersistenceError::query(format!("invalid stored user {id}: {err}"))
    };
    let user = NewUser {
        email: EmailAddress::new(&row.email).map_err(invalid)?,
        display_name: DisplayName::new(&row.display_name).map_err(invalid)?,
        role: row.role.parse::<Role>().map_err(invalid)?,
        password_hash: PasswordHash::new(row.password_hash),
        avatar_url: row.avatar_url,
    };
    Ok(user.into_user(UserId::new(id)))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row = NewUserRow {
            email: user.email.as_ref(),
            display_name: user.display_name.as_ref(),
            password_hash: user.password_hash.as_ref(),
            avatar_url: &user.avatar_url,
            role: user.role.as_str(),
        };
        let id: i32 = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(user.into_user(UserId::new(id)))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_display_name(
        &self,
        display_name: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        users::table
            .filter(users::display_name.eq(display_name))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?
            .map(row_to_user)
            .transpose()
    }

    async fn any_exists(&self) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::select(exists(users::table.select(users::id)))
            .get_result(&mut conn)
            .await
            .map_err(map_failure)
    }
}
