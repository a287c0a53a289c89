//! OTP lifecycle policy configuration

use serde::{Deserialize, Serialize};

use super::env_parse;
use crate::errors::ConfigError;

/// Default lifetime of an issued code (5 minutes)
pub const DEFAULT_EXPIRATION_SECONDS: i64 = 300;

/// Default minimum interval between two issuances for one phone number (2 minutes)
pub const DEFAULT_COOLDOWN_SECONDS: i64 = 120;

/// Default number of failed verifications a record tolerates
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default upper bound on a single SMS delivery call
pub const DEFAULT_DELIVERY_TIMEOUT_SECONDS: u64 = 10;

/// Policy knobs for code issuance and verification
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Seconds from issuance until a code expires
    #[serde(default = "default_expiration_seconds")]
    pub expiration_seconds: i64,

    /// Seconds after issuance during which a new code is refused
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: i64,

    /// Failed verifications allowed before the record is discarded
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds to wait for the SMS provider before treating delivery as failed
    #[serde(default = "default_delivery_timeout_seconds")]
    pub delivery_timeout_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiration_seconds: DEFAULT_EXPIRATION_SECONDS,
            cooldown_seconds: DEFAULT_COOLDOWN_SECONDS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delivery_timeout_seconds: DEFAULT_DELIVERY_TIMEOUT_SECONDS,
        }
    }
}

impl OtpConfig {
    /// Load from `OTP_*` variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            expiration_seconds: env_parse("OTP_EXPIRATION_SECONDS", defaults.expiration_seconds)?,
            cooldown_seconds: env_parse("OTP_COOLDOWN_SECONDS", defaults.cooldown_seconds)?,
            max_attempts: env_parse("OTP_MAX_ATTEMPTS", defaults.max_attempts)?,
            delivery_timeout_seconds: env_parse(
                "OTP_DELIVERY_TIMEOUT_SECONDS",
                defaults.delivery_timeout_seconds,
            )?,
        })
    }

    /// Reject non-positive durations and a zero attempt budget
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.expiration_seconds <= 0 {
            return Err(ConfigError::Invalid {
                message: "OTP_EXPIRATION_SECONDS must be positive".to_string(),
            });
        }
        if self.cooldown_seconds < 0 {
            return Err(ConfigError::Invalid {
                message: "OTP_COOLDOWN_SECONDS must not be negative".to_string(),
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                message: "OTP_MAX_ATTEMPTS must be at least 1".to_string(),
            });
        }
        if self.delivery_timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                message: "OTP_DELIVERY_TIMEOUT_SECONDS must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Whole minutes a code stays valid, as quoted in the SMS body
    pub fn expiration_minutes(&self) -> i64 {
        (self.expiration_seconds + 59) / 60
    }
}

fn default_expiration_seconds() -> i64 {
    DEFAULT_EXPIRATION_SECONDS
}

fn default_cooldown_seconds() -> i64 {
    DEFAULT_COOLDOWN_SECONDS
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_delivery_timeout_seconds() -> u64 {
    DEFAULT_DELIVERY_TIMEOUT_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_policy() {
        let config = OtpConfig::default();
        assert_eq!(config.expiration_seconds, 300);
        assert_eq!(config.cooldown_seconds, 120);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.delivery_timeout_seconds, 10);
        assert_eq!(config.expiration_minutes(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let config = OtpConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_expiration_minutes_rounds_up() {
        let config = OtpConfig {
            expiration_seconds: 90,
            ..Default::default()
        };
        assert_eq!(config.expiration_minutes(), 2);
    }
}
