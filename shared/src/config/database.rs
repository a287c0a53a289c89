//! Record store configuration module

use serde::{Deserialize, Serialize};

use super::{env_opt, env_parse};
use crate::errors::ConfigError;

/// Record store configuration; no URL selects the in-memory store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// MySQL connection URL
    #[serde(default)]
    pub url: Option<String>,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            url: env_opt("DATABASE_URL"),
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            connect_timeout: env_parse("DATABASE_CONNECT_TIMEOUT", defaults.connect_timeout)?,
        })
    }

    /// Whether a persistent database is configured
    pub fn is_persistent(&self) -> bool {
        self.url.is_some()
    }

    /// Only MySQL URLs are supported
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.url {
            if !url.starts_with("mysql://") {
                return Err(ConfigError::InvalidValue {
                    key: "DATABASE_URL".to_string(),
                    value: "<redacted: expected a mysql:// URL>".to_string(),
                });
            }
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                message: "DATABASE_MAX_CONNECTIONS must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
