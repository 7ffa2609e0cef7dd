//! Argon2id `CredentialHasher` adapter.
//!
//! Digests are PHC strings carrying their own salt and parameters. Both
//! operations are CPU-bound and run on the blocking thread pool.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, password_hash};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordDigest;
use crate::domain::ports::{CredentialHashError, CredentialHasher};

/// Password hasher backed by `argon2` with its default Argon2id parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    /// Create a hasher with the library's recommended parameters.
    pub fn new() -> Self {
        Self
    }
}

fn hash_blocking(password: &str) -> Result<PasswordDigest, CredentialHashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| PasswordDigest::new(hash.to_string()))
        .map_err(|err| CredentialHashError::hash(err.to_string()))
}

fn verify_blocking(password: &str, digest: &str) -> Result<bool, CredentialHashError> {
    let parsed = PasswordHash::new(digest)
        .map_err(|err| CredentialHashError::malformed_digest(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(CredentialHashError::hash(err.to_string())),
    }
}

fn join_error(err: tokio::task::JoinError) -> CredentialHashError {
    CredentialHashError::hash(format!("hashing task failed: {err}"))
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &str) -> Result<PasswordDigest, CredentialHashError> {
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hash_blocking(&password))
            .await
            .map_err(join_error)?
    }

    async fn verify(
        &self,
        password: &str,
        digest: &PasswordDigest,
    ) -> Result<bool, CredentialHashError> {
        let password = Zeroizing::new(password.to_owned());
        let digest = digest.as_str().to_owned();
        tokio::task::spawn_blocking(move || verify_blocking(&password, &digest))
            .await
            .map_err(join_error)?
    }
}
