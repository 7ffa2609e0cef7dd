//! Account domain service: signup, login, token authentication and profile.
//!
//! The service is generic over the credential store, the password hasher and
//! the token codec so tests substitute doubles for each driven port.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::domain::ports::{
    CredentialHashError, CredentialHasher, LoginService, SignupService, TokenAuthenticator,
    TokenCodec, TokenError, UserPersistenceError, UserProfileQuery, UserRepository,
};
use crate::domain::{
    AccessToken, Error, LoginCredentials, PasswordDigest, SignupDetails, User, UserAccount,
    UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const DUPLICATE_EMAIL: &str = "email already registered";
/// Hashed once to give unknown-account logins a digest to verify against.
const DECOY_PASSWORD: &str = "taskflow-decoy-password";

fn duplicate_email_error() -> Error {
    Error::invalid_request(DUPLICATE_EMAIL)
        .with_details(json!({ "field": "email", "code": "duplicate_email" }))
}

fn map_user_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => duplicate_email_error(),
    }
}

fn map_hash_error(error: CredentialHashError) -> Error {
    Error::internal(format!("credential hashing failed: {error}"))
}

/// Account service implementing the signup, login, authentication and
/// profile driving ports.
#[derive(Clone)]
pub struct AccountService<U, H, C> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<C>,
    clock: Arc<dyn Clock>,
    decoy_digest: Arc<OnceCell<PasswordDigest>>,
}

impl<U, H, C> AccountService<U, H, C> {
    /// Create a new service from its driven ports.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
            decoy_digest: Arc::new(OnceCell::new()),
        }
    }
}

impl<U, H, C> AccountService<U, H, C>
where
    H: CredentialHasher,
{
    /// Run a verification that cannot succeed so unknown accounts cost as
    /// much as a wrong password.
    async fn verify_decoy(&self, password: &str) -> Result<(), Error> {
        let digest = self
            .decoy_digest
            .get_or_try_init(|| self.hasher.hash(DECOY_PASSWORD))
            .await
            .map_err(map_hash_error)?;
        let _matched = self
            .hasher
            .verify(password, digest)
            .await
            .map_err(map_hash_error)?;
        Ok(())
    }
}

#[async_trait]
impl<U, H, C> SignupService for AccountService<U, H, C>
where
    U: UserRepository,
    H: CredentialHasher,
    C: TokenCodec,
{
    async fn signup(&self, details: SignupDetails) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(details.email())
            .await
            .map_err(map_user_persistence_error)?;
        if existing.is_some() {
            return Err(duplicate_email_error());
        }

        let password_digest = self
            .hasher
            .hash(details.password())
            .await
            .map_err(map_hash_error)?;

        let user = User::new(
            UserId::random(),
            details.name().clone(),
            details.email().clone(),
            self.clock.utc(),
        )
        .with_profile(
            details.role_title().map(str::to_owned),
            details.bio().map(str::to_owned),
        );
        let account = UserAccount {
            user,
            password_digest,
        };

        self.users
            .insert(&account)
            .await
            .map_err(map_user_persistence_error)?;

        info!(user_id = %account.user.id(), "account created");
        Ok(account.user)
    }
}

#[async_trait]
impl<U, H, C> LoginService for AccountService<U, H, C>
where
    U: UserRepository,
    H: CredentialHasher,
    C: TokenCodec,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let account = match credentials.email_address() {
            Some(email) => self
                .users
                .find_by_email(&email)
                .await
                .map_err(map_user_persistence_error)?,
            None => None,
        };
        let Some(account) = account else {
            self.verify_decoy(credentials.password()).await?;
            debug!("login rejected: unknown account");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_digest)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user_id = %account.user.id(), "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self
            .tokens
            .issue(account.user.id(), self.clock.utc())
            .map_err(|err| Error::internal(format!("token issuance failed: {err}")))?;
        info!(user_id = %account.user.id(), "login succeeded");
        Ok(token)
    }
}

impl<U, H, C> TokenAuthenticator for AccountService<U, H, C>
where
    U: UserRepository,
    H: CredentialHasher,
    C: TokenCodec,
{
    fn authenticate(&self, token: &AccessToken) -> Result<UserId, Error> {
        self.tokens
            .verify(token, self.clock.utc())
            .map_err(|err| match err {
                TokenError::Expired => Error::unauthorized("token expired"),
                TokenError::Invalid { message } => {
                    debug!(reason = %message, "bearer token rejected");
                    Error::unauthorized("invalid token")
                }
                TokenError::Issue { message } => {
                    Error::internal(format!("token verification failed: {message}"))
                }
            })
    }
}

#[async_trait]
impl<U, H, C> UserProfileQuery for AccountService<U, H, C>
where
    U: UserRepository,
    H: CredentialHasher,
    C: TokenCodec,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::unauthorized("account no longer exists"))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
