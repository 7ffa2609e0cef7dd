//! HS256 JWT `TokenCodec` adapter.
//!
//! Tokens carry `sub` (user id), `iat` and `exp` as Unix seconds. Expiry is
//! checked against the caller-supplied instant rather than the system clock
//! so the domain clock stays authoritative.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenCodec, TokenError};
use crate::domain::{AccessToken, UserId};

use super::TokenSecret;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer tokens with a shared HMAC secret.
pub struct JwtTokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenCodec {
    /// Default token lifetime.
    pub const DEFAULT_TTL: Duration = Duration::hours(24);

    /// Build a codec from the signing secret and token lifetime.
    pub fn new(secret: &TokenSecret, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn issue(&self, user_id: &UserId, now: DateTime<Utc>) -> Result<AccessToken, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::issue(err.to_string()))
    }

    fn verify(&self, token: &AccessToken, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token.as_str(), &self.decoding, &self.validation).map_err(
            |err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            },
        )?;

        if data.claims.exp <= now.timestamp() {
            return Err(TokenError::expired());
        }
        UserId::new(&data.claims.sub).map_err(|err| TokenError::invalid(err.to_string()))
    }
}
