//! Server configuration for `UniKhoj`.
//!
//! Loads configuration from environment variables with fixed local
//! defaults. Every setting can be overridden without a config file.

use std::net::SocketAddr;

/// Port used when neither `PORT` nor `UNIKHOJ_BIND_ADDR` is set.
pub const DEFAULT_PORT: u16 = 5000;

/// Connection string used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/unikhoj";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Lead storage backend.
    pub storage_backend: StorageBackendType,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Single allowed CORS origin; any origin when `None`.
    pub cors_origin: Option<String>,
}

/// Supported storage backend types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackendType {
    /// In-memory (development only, data lost on restart).
    Memory,
    /// `PostgreSQL` persistent storage.
    Postgres { url: String },
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            storage_backend: StorageBackendType::Postgres {
                url: DEFAULT_DATABASE_URL.to_owned(),
            },
            log_level: "info".to_owned(),
            cors_origin: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// Environment variables:
    /// - `PORT`: port to bind on (binds to `0.0.0.0`)
    /// - `UNIKHOJ_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:5000`)
    /// - `UNIKHOJ_STORAGE`: `postgres` or `memory` (default: `postgres`)
    /// - `DATABASE_URL`: `PostgreSQL` connection string (default: `postgres://localhost:5432/unikhoj`)
    /// - `UNIKHOJ_LOG_LEVEL`: log filter (default: `info`)
    /// - `UNIKHOJ_CORS_ORIGIN`: allowed browser origin (default: any)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Priority: UNIKHOJ_BIND_ADDR > PORT > default 127.0.0.1:5000
        let bind_addr = if let Some(addr) = lookup("UNIKHOJ_BIND_ADDR") {
            addr.parse().unwrap_or(defaults.bind_addr)
        } else if let Some(port_str) = lookup("PORT") {
            let port: u16 = port_str.parse().unwrap_or(DEFAULT_PORT);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            defaults.bind_addr
        };

        let storage_backend = match lookup("UNIKHOJ_STORAGE")
            .unwrap_or_else(|| "postgres".to_owned())
            .to_lowercase()
            .as_str()
        {
            "memory" => StorageBackendType::Memory,
            _ => StorageBackendType::Postgres {
                url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned()),
            },
        };

        let log_level = lookup("UNIKHOJ_LOG_LEVEL").unwrap_or(defaults.log_level);

        let cors_origin = lookup("UNIKHOJ_CORS_ORIGIN").filter(|o| !o.trim().is_empty());

        Self {
            bind_addr,
            storage_backend,
            log_level,
            cors_origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_local_postgres_on_5000() {
        let config = load(&[]);
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 5000)));
        assert_eq!(
            config.storage_backend,
            StorageBackendType::Postgres {
                url: DEFAULT_DATABASE_URL.to_owned()
            }
        );
        assert_eq!(config.log_level, "info");
        assert_eq!(config.cors_origin, None);
    }

    #[test]
    fn port_binds_all_interfaces() {
        let config = load(&[("PORT", "8080")]);
        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn bind_addr_overrides_port() {
        let config = load(&[("PORT", "8080"), ("UNIKHOJ_BIND_ADDR", "127.0.0.1:9000")]);
        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
    }

    #[test]
    fn unparseable_port_falls_back() {
        let config = load(&[("PORT", "http")]);
        assert_eq!(config.bind_addr.port(), DEFAULT_PORT);
    }

    #[test]
    fn database_url_and_memory_storage() {
        let config = load(&[("DATABASE_URL", "postgres://db/leads")]);
        assert_eq!(
            config.storage_backend,
            StorageBackendType::Postgres {
                url: "postgres://db/leads".to_owned()
            }
        );

        let config = load(&[("UNIKHOJ_STORAGE", "Memory")]);
        assert_eq!(config.storage_backend, StorageBackendType::Memory);
    }

    #[test]
    fn blank_cors_origin_means_any() {
        let config = load(&[("UNIKHOJ_CORS_ORIGIN", " ")]);
        assert_eq!(config.cors_origin, None);
    }
}
