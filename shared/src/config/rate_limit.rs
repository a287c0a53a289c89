//! Rate limiting configuration module

use serde::{Deserialize, Serialize};

use super::env_parse;
use crate::errors::ConfigError;

/// Fixed-window limiter settings for the request-otp entry point
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Requests admitted per caller address per window
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: i64,

    /// How often stale buckets and expired records are purged
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_requests: default_max_requests(),
            window_seconds: default_window_seconds(),
            cleanup_interval_seconds: default_cleanup_interval_seconds(),
        }
    }
}

impl RateLimitConfig {
    /// Load from `RATE_LIMIT_*` variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            enabled: env_parse("RATE_LIMIT_ENABLED", defaults.enabled)?,
            max_requests: env_parse("RATE_LIMIT_MAX_REQUESTS", defaults.max_requests)?,
            window_seconds: env_parse("RATE_LIMIT_WINDOW_SECONDS", defaults.window_seconds)?,
            cleanup_interval_seconds: env_parse(
                "RATE_LIMIT_CLEANUP_INTERVAL_SECONDS",
                defaults.cleanup_interval_seconds,
            )?,
        })
    }

    /// Reject a zero limit or an empty window
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_requests == 0 {
            return Err(ConfigError::Invalid {
                message: "RATE_LIMIT_MAX_REQUESTS must be at least 1".to_string(),
            });
        }
        if self.window_seconds <= 0 {
            return Err(ConfigError::Invalid {
                message: "RATE_LIMIT_WINDOW_SECONDS must be positive".to_string(),
            });
        }
        if self.cleanup_interval_seconds == 0 {
            return Err(ConfigError::Invalid {
                message: "RATE_LIMIT_CLEANUP_INTERVAL_SECONDS must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_requests() -> u32 {
    5
}

fn default_window_seconds() -> i64 {
    15 * 60
}

fn default_cleanup_interval_seconds() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rate_limit_config() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_requests, 5);
        assert_eq!(config.window_seconds, 900);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_window() {
        let config = RateLimitConfig {
            window_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
