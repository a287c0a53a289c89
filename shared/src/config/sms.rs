//! SMS provider configuration module

use serde::{Deserialize, Serialize};

use super::{env_opt, env_parse};
use crate::errors::ConfigError;

/// Supported SMS providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Logs messages instead of sending them
    #[default]
    Mock,
    /// Twilio Programmable Messaging
    Twilio,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" | "console" => Ok(SmsProvider::Mock),
            "twilio" => Ok(SmsProvider::Twilio),
            _ => Err(format!("Unknown SMS provider: {}", s)),
        }
    }
}

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Which provider delivers codes
    pub provider: SmsProvider,

    /// Twilio account SID
    #[serde(default)]
    pub account_sid: Option<String>,

    /// Twilio auth token
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,

    /// Sender number in E.164 format
    #[serde(default)]
    pub from_number: Option<String>,

    /// Twilio REST base URL, overridable for testing against a stub
    pub api_base_url: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::Mock,
            account_sid: None,
            auth_token: None,
            from_number: None,
            api_base_url: String::from("https://api.twilio.com"),
        }
    }
}

impl SmsConfig {
    /// Load from `SMS_PROVIDER` and `TWILIO_*` variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            provider: env_parse("SMS_PROVIDER", defaults.provider)?,
            account_sid: env_opt("TWILIO_ACCOUNT_SID"),
            auth_token: env_opt("TWILIO_AUTH_TOKEN"),
            from_number: env_opt("TWILIO_FROM_NUMBER"),
            api_base_url: env_opt("TWILIO_API_BASE_URL").unwrap_or(defaults.api_base_url),
        })
    }

    /// Twilio needs credentials and an E.164 sender
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider != SmsProvider::Twilio {
            return Ok(());
        }
        if self.account_sid.is_none() {
            return Err(ConfigError::Missing {
                key: "TWILIO_ACCOUNT_SID".to_string(),
            });
        }
        if self.auth_token.is_none() {
            return Err(ConfigError::Missing {
                key: "TWILIO_AUTH_TOKEN".to_string(),
            });
        }
        match &self.from_number {
            None => Err(ConfigError::Missing {
                key: "TWILIO_FROM_NUMBER".to_string(),
            }),
            Some(from) if !from.starts_with('+') => Err(ConfigError::InvalidValue {
                key: "TWILIO_FROM_NUMBER".to_string(),
                value: from.clone(),
            }),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_needs_no_credentials() {
        assert!(SmsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_twilio_requires_credentials() {
        let mut config = SmsConfig {
            provider: SmsProvider::Twilio,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Missing { key: "TWILIO_ACCOUNT_SID".to_string() })
        );

        config.account_sid = Some("AC123".to_string());
        config.auth_token = Some("secret".to_string());
        config.from_number = Some("15005550006".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));

        config.from_number = Some("+15005550006".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("Twilio".parse::<SmsProvider>(), Ok(SmsProvider::Twilio));
        assert_eq!("mock".parse::<SmsProvider>(), Ok(SmsProvider::Mock));
        assert!("carrier-pigeon".parse::<SmsProvider>().is_err());
    }
}
