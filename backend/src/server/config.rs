//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::time::Duration;
use blog::inbound::http::session_config::SessionSettings;
use blog::outbound::password::Argon2Settings;
use blog::outbound::persistence::DbPool;

const DEFAULT_SESSION_TTL_HOURS: i64 = 2;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) session_ttl: Duration,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) argon2: Argon2Settings,
}

impl ServerConfig {
    /// Construct a server configuration from validated session settings.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            session_ttl: Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            bind_addr,
            db_pool: None,
            argon2: Argon2Settings::default(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one, every repository port is served by the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override how long a session cookie stays valid.
    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Override the Argon2id cost parameters.
    #[must_use]
    pub fn with_argon2(mut self, argon2: Argon2Settings) -> Self {
        self.argon2 = argon2;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
