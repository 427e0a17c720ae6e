//! Server configuration for Launchgate.
//!
//! Loads configuration from environment variables with sensible defaults.
//! All settings can be overridden via `LAUNCHGATE_*` environment variables.

use std::net::SocketAddr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Registration store backend type.
    pub store_backend: StoreBackendType,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Origin allowed by CORS (the hosted splash page). `None` allows any.
    pub allowed_origin: Option<String>,
}

/// Supported registration store backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackendType {
    /// In-memory (development only, data lost on restart).
    Memory,
    /// PostgreSQL (recommended for hosted deployments).
    Postgres { url: String },
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PORT` — port to bind on (hosting convention, binds to `0.0.0.0`)
    /// - `LAUNCHGATE_BIND_ADDR` — full bind address (overrides `PORT`, default: `127.0.0.1:8080`)
    /// - `LAUNCHGATE_STORAGE` — `memory` or `postgres` (default: `memory`)
    /// - `DATABASE_URL` — PostgreSQL connection string (required when `LAUNCHGATE_STORAGE=postgres`)
    /// - `LAUNCHGATE_LOG_LEVEL` — log filter (default: `info`)
    /// - `LAUNCHGATE_ALLOWED_ORIGIN` — CORS origin for the splash page (default: any)
    #[must_use]
    pub fn from_env() -> Self {
        // Priority: LAUNCHGATE_BIND_ADDR > PORT > default 127.0.0.1:8080
        let bind_addr = if let Ok(addr) = std::env::var("LAUNCHGATE_BIND_ADDR") {
            addr.parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8080)))
        } else if let Ok(port_str) = std::env::var("PORT") {
            let port: u16 = port_str.parse().unwrap_or(8080);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            SocketAddr::from(([127, 0, 0, 1], 8080))
        };

        let store_backend = match std::env::var("LAUNCHGATE_STORAGE")
            .unwrap_or_else(|_| "memory".to_owned())
            .to_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => {
                let url = std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgres://localhost/launchgate".to_owned());
                StoreBackendType::Postgres { url }
            }
            _ => StoreBackendType::Memory,
        };

        let log_level =
            std::env::var("LAUNCHGATE_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());

        let allowed_origin = std::env::var("LAUNCHGATE_ALLOWED_ORIGIN").ok();

        Self {
            bind_addr,
            store_backend,
            log_level,
            allowed_origin,
        }
    }
}
