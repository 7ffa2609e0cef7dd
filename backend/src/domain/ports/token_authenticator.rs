//! Driving port guarding every protected operation.

use crate::domain::{AccessToken, Error, UserId};

/// Resolve a presented bearer token to the user it identifies.
#[cfg_attr(test, mockall::automock)]
pub trait TokenAuthenticator: Send + Sync {
    /// Fail with `unauthorized` when the token is malformed, unverifiable or
    /// expired.
    fn authenticate(&self, token: &AccessToken) -> Result<UserId, Error>;
}
