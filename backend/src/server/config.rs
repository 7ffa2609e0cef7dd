//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use taskflow::outbound::persistence::DbPool;
use taskflow::outbound::security::{JwtTokenCodec, TokenSecret};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: TokenSecret,
    pub(crate) token_ttl: chrono::Duration,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration with the default token lifetime and
    /// in-memory storage.
    #[must_use]
    pub fn new(token_secret: TokenSecret, bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            token_secret,
            token_ttl: JwtTokenCodec::DEFAULT_TTL,
            db_pool: None,
        }
    }

    /// Override how long issued tokens stay valid.
    #[must_use]
    pub fn with_token_ttl(mut self, ttl: chrono::Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, accounts and tasks are stored in PostgreSQL; otherwise
    /// the in-memory repositories are used.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
