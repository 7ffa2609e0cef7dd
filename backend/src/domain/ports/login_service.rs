//! Driving port for login use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! exchange credentials for a bearer token without knowing (or importing)
//! the backing infrastructure.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, LoginCredentials};

/// Domain use-case port for logging in.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and issue a signed token for the account.
    ///
    /// Unknown emails and wrong passwords fail identically with
    /// `unauthorized`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;
}
