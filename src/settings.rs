//! Runtime settings from environment variables (a `.env` file is loaded by the server binary).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/todo_admin";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ADMIN_PATH: &str = "/admin";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub admin_path: String,
    pub db_max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_raw.parse().map_err(|e| ConfigError::Invalid {
            key: "BIND_ADDR",
            message: format!("'{}': {}", bind_raw, e),
        })?;

        let admin_path = lookup("ADMIN_PATH").unwrap_or_else(|| DEFAULT_ADMIN_PATH.into());
        if !admin_path.starts_with('/') {
            return Err(ConfigError::Invalid {
                key: "ADMIN_PATH",
                message: format!("'{}' must start with '/'", admin_path),
            });
        }

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DB_MAX_CONNECTIONS",
                        message: format!("'{}' is not a positive integer", raw),
                    })
                }
            },
        };

        Ok(Self {
            database_url,
            bind_addr,
            admin_path,
            db_max_connections,
        })
    }
}
