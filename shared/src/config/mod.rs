//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `database` - Record store connection settings
//! - `environment` - Environment detection
//! - `otp` - Code lifetime, cooldown and attempt policy
//! - `rate_limit` - Fixed-window limiter for the request-otp entry point
//! - `server` - HTTP server and CORS configuration
//! - `sms` - SMS provider selection and credentials

pub mod database;
pub mod environment;
pub mod otp;
pub mod rate_limit;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::errors::ConfigError;

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use otp::OtpConfig;
pub use rate_limit::RateLimitConfig;
pub use server::{CorsConfig, ServerConfig};
pub use sms::{SmsConfig, SmsProvider};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// OTP lifecycle policy
    pub otp: OtpConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// SMS provider configuration
    pub sms: SmsConfig,

    /// Record store configuration
    pub database: DatabaseConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            otp: OtpConfig::from_env()?,
            rate_limit: RateLimitConfig::from_env()?,
            sms: SmsConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            cors: CorsConfig::from_env(),
        })
    }

    /// Check cross-field constraints that the individual loaders cannot see
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.otp.validate()?;
        self.rate_limit.validate()?;
        self.sms.validate()?;
        self.database.validate()?;
        if self.environment.is_production() && self.sms.provider == SmsProvider::Mock {
            return Err(ConfigError::Invalid {
                message: "the mock SMS provider cannot be used in production".to_string(),
            });
        }
        Ok(())
    }
}

/// Read an environment variable and parse it, falling back to `default` when unset
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            })
        }
        _ => Ok(default),
    }
}

/// Read an optional, non-empty environment variable
pub(crate) fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
