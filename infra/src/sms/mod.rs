//! SMS Service Module
//!
//! SMS delivery implementations for OTP codes.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Console output for development
//! - **Twilio Support**: Production SMS via the Twilio REST API
//! - **Adapter**: Bridges any provider to the core delivery seam

use std::sync::Arc;

use otp_shared::{SmsConfig, SmsProvider};

pub mod adapter;
pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// Re-export commonly used types
pub use adapter::SmsServiceAdapter;
pub use mock_sms::{MockSmsService, SentSms};
pub use sms_service::SmsService;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// # Arguments
///
/// * `config` - SMS configuration containing provider settings
/// * `request_timeout_secs` - Upper bound for a single provider request
///
/// # Returns
///
/// The selected provider, or a configuration error when the provider cannot
/// be built from the given settings
pub fn create_sms_service(
    config: &SmsConfig,
    request_timeout_secs: u64,
) -> Result<Arc<dyn SmsService>, InfrastructureError> {
    match config.provider {
        SmsProvider::Mock => {
            tracing::info!(provider = "mock", "Using mock SMS service");
            Ok(Arc::new(MockSmsService::new()))
        }
        #[cfg(feature = "twilio-sms")]
        SmsProvider::Twilio => {
            let twilio_config = TwilioConfig::from_sms_config(config, request_timeout_secs)?;
            Ok(Arc::new(TwilioSmsService::new(twilio_config)?))
        }
        #[cfg(not(feature = "twilio-sms"))]
        SmsProvider::Twilio => {
            let _ = request_timeout_secs;
            Err(InfrastructureError::Config(
                "Twilio provider requires the twilio-sms feature".to_string(),
            ))
        }
    }
}
