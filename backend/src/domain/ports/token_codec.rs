//! Port for issuing and verifying signed bearer tokens.

use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token codec adapters.
    pub enum TokenError {
        /// The token could not be decoded or its signature did not verify.
        Invalid { message: String } => "token rejected: {message}",
        /// The token verified but its expiry has passed.
        Expired => "token expired",
        /// Signing a new token failed.
        Issue { message: String } => "token issuance failed: {message}",
    }
}

/// Stateless token codec: no server-side session record exists.
#[cfg_attr(test, mockall::automock)]
pub trait TokenCodec: Send + Sync {
    /// Issue a token identifying `user_id`, valid from `now`.
    fn issue(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<AccessToken, TokenError>;

    /// Verify `token` at `now` and return the user it identifies.
    fn verify(&self, token: &AccessToken, now: DateTime<Utc>) -> Result<UserId, TokenError>;
}
