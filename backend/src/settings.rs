//! Server settings loaded via OrthoConfig from CLI flags, `RECORDKEEPER_*`
//! environment variables and configuration files.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_MAX_ID_ATTEMPTS;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime configuration for the `recordkeeper` server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECORDKEEPER")]
pub struct AppSettings {
    /// Address to bind; defaults to all interfaces.
    #[ortho_config(default = DEFAULT_HOST)]
    pub host: IpAddr,
    /// Port to bind.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// PostgreSQL connection string. Without one, records live in memory.
    pub database_url: Option<String>,
    /// Upper bound on student identifier draws per create request.
    #[ortho_config(default = DEFAULT_MAX_ID_ATTEMPTS)]
    pub max_id_attempts: u32,
    /// Size of the database connection pool.
    #[ortho_config(default = DEFAULT_DB_MAX_CONNECTIONS)]
    pub db_max_connections: u32,
}

impl AppSettings {
    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Identifier draw cap; zero falls back to the default.
    pub fn max_id_attempts(&self) -> u32 {
        if self.max_id_attempts == 0 {
            DEFAULT_MAX_ID_ATTEMPTS
        } else {
            self.max_id_attempts
        }
    }

    /// Pool size; zero falls back to the default.
    pub fn db_max_connections(&self) -> u32 {
        if self.db_max_connections == 0 {
            DEFAULT_DB_MAX_CONNECTIONS
        } else {
            self.db_max_connections
        }
    }
}
