//! Driving port for account creation.

use async_trait::async_trait;

use crate::domain::{Error, SignupDetails, User};

/// Domain use-case port for registering a new account.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create an account, storing only a salted digest of the password.
    async fn signup(&self, details: SignupDetails) -> Result<User, Error>;
}
