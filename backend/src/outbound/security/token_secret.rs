//! Token signing secret loading and fingerprinting.
//!
//! The secret is read from a file (typically a mounted orchestrator secret).
//! Debug builds, or deployments that opt in, fall back to a random secret
//! when the file is unavailable; tokens then stop verifying after a restart.

use std::fmt;
use std::path::{Path, PathBuf};

use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

/// Minimum secret length accepted in release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing or short secret.
    Debug,
    /// Release builds require a real secret unless ephemeral ones are allowed.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use taskflow::outbound::security::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while loading the token secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenSecretError {
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file exists but is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// HMAC secret for signing bearer tokens. Zeroed on drop.
#[derive(Clone)]
pub struct TokenSecret(Zeroizing<Vec<u8>>);

impl TokenSecret {
    /// Wrap raw secret bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Generate a random 64-byte secret.
    pub fn generate() -> Self {
        let mut bytes = vec![0_u8; 64];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Borrow the secret bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Truncated SHA-256 fingerprint of the secret as lowercase hex.
    ///
    /// Lets operators tell which secret is active without exposing it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use taskflow::outbound::security::TokenSecret;
    ///
    /// let fp = TokenSecret::generate().fingerprint();
    /// assert_eq!(fp.len(), 16);
    /// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenSecret")
            .field(&self.fingerprint())
            .finish()
    }
}

/// Load the signing secret from `path`.
///
/// # Errors
///
/// In release builds without `allow_ephemeral`, returns
/// [`TokenSecretError::KeyRead`] when the file is unreadable. Release builds
/// always reject secrets shorter than [`TOKEN_SECRET_MIN_LEN`].
pub fn load_token_secret(
    path: &Path,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<TokenSecret, TokenSecretError> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let length = bytes.len();
            if mode == BuildMode::Release && length < TOKEN_SECRET_MIN_LEN {
                return Err(TokenSecretError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: TOKEN_SECRET_MIN_LEN,
                });
            }
            Ok(TokenSecret(bytes))
        }
        Err(error) => {
            if mode == BuildMode::Debug || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token secret; tokens will not survive a restart"
                );
                Ok(TokenSecret::generate())
            } else {
                Err(TokenSecretError::KeyRead {
                    path: path.to_path_buf(),
                    source: error,
                })
            }
        }
    }
}
