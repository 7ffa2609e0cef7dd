//! Server configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `TASKFLOW_*` environment variables and an
//! optional config file, in increasing order of precedence as implemented by
//! `ortho_config`. Unset values fall back to the defaults below.

use std::net::{AddrParseError, SocketAddr};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_SECRET_FILE: &str = "/var/run/secrets/token_secret";
const DEFAULT_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;

/// Configuration values for the `taskflow-server` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKFLOW")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server keeps data in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: Option<u32>,
    /// File holding the token signing secret.
    pub token_secret_file: Option<PathBuf>,
    /// Lifetime of issued bearer tokens.
    pub token_ttl_secs: Option<u64>,
    /// Permit a generated signing secret in release builds.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`AddrParseError`] when the configured value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Path of the token secret file.
    pub fn token_secret_file(&self) -> &Path {
        self.token_secret_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_TOKEN_SECRET_FILE))
    }

    /// Token lifetime, defaulting to 24 hours. Values too large for
    /// `chrono` saturate at the maximum representable number of seconds.
    pub fn token_ttl(&self) -> chrono::Duration {
        let secs = self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        let secs = i64::try_from(secs).unwrap_or(i64::MAX / 1_000);
        chrono::Duration::try_seconds(secs).unwrap_or(chrono::Duration::MAX)
    }
}
