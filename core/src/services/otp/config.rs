//! Configuration for the OTP lifecycle service

use chrono::Duration;
use otp_shared::config::OtpConfig;

/// Configuration for the OTP lifecycle service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// How long a code stays valid after issuance
    pub code_lifetime: Duration,
    /// Minimum interval between two issuances for one phone number
    pub cooldown: Duration,
    /// Failed verifications tolerated before the record is discarded
    pub max_attempts: u32,
    /// Upper bound on a single delivery call
    pub delivery_timeout: std::time::Duration,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_lifetime: Duration::seconds(config.expiration_seconds),
            cooldown: Duration::seconds(config.cooldown_seconds),
            max_attempts: config.max_attempts,
            delivery_timeout: std::time::Duration::from_secs(config.delivery_timeout_seconds),
        }
    }
}

impl OtpServiceConfig {
    /// Render the SMS body for a code
    pub fn render_message(&self, code: &str) -> String {
        let minutes = (self.code_lifetime.num_seconds() + 59) / 60;
        format!(
            "Your verification code is {}. It expires in {} minutes.",
            code, minutes
        )
    }
}
