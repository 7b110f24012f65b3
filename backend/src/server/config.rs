//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use recordkeeper::domain::DEFAULT_MAX_ID_ATTEMPTS;
use recordkeeper::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) max_id_attempts: u32,
}

impl ServerConfig {
    /// Serve from in-memory stores on `bind_addr` until a pool is attached.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
        }
    }

    /// Attach a database connection pool; every collection then lives in
    /// PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Cap the number of identifier draws per student creation.
    #[must_use]
    pub fn with_max_id_attempts(mut self, attempts: u32) -> Self {
        self.max_id_attempts = attempts;
        self
    }
}
