//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Rows are re-validated through the domain constructors on the way out so a
//! hand-edited database cannot smuggle an invalid account into the service.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, PasswordDigest, User, UserAccount, UserId, UserName, normalise_profile_field,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, email: &str) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation => UserPersistenceError::duplicate_email(email),
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
        DieselFailure::ForeignKeyViolation => UserPersistenceError::query("constraint violation"),
    }
}

fn map_read_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(error, "")
}

fn row_to_user(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let UserRow {
        id,
        name,
        email,
        password_digest,
        role_title,
        bio,
        created_at,
    } = row;

    let invalid = |err: crate::domain::UserValidationError| {
        UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
    };
    let name = UserName::new(name).map_err(invalid)?;
    let email = EmailAddress::new(email).map_err(invalid)?;
    let role_title = normalise_profile_field("roleTitle", role_title.as_deref()).map_err(invalid)?;
    let bio = normalise_profile_field("bio", bio.as_deref()).map_err(invalid)?;

    let user = User::new(UserId::from_uuid(id), name, email, created_at).with_profile(role_title, bio);
    Ok(UserAccount {
        user,
        password_digest: PasswordDigest::new(password_digest),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user = &account.user;
        let email = user.email().as_ref();

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.name().as_ref(),
            email,
            password_digest: account.password_digest.as_str(),
            role_title: user.role_title(),
            bio: user.bio(),
            created_at: user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, email))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        Ok(row.map(row_to_user).transpose()?.map(|account| account.user))
    }
}
