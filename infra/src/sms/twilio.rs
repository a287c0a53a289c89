//! Twilio SMS Service Implementation
//!
//! Sends messages through the Twilio Programmable Messaging REST API
//! (`POST /2010-04-01/Accounts/{sid}/Messages.json`) with HTTP basic auth.
//! Each send is a single request; there are no retries.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

use otp_shared::phone::mask_phone_number;
use otp_shared::SmsConfig;

use crate::{sms::sms_service::SmsService, InfrastructureError};

/// Twilio's limit on a message body
pub const MAX_BODY_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// REST API base URL
    pub api_base_url: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TwilioConfig {
    /// Build from the shared SMS configuration
    pub fn from_sms_config(
        config: &SmsConfig,
        request_timeout_secs: u64,
    ) -> Result<Self, InfrastructureError> {
        config.validate()?;

        let require = |value: &Option<String>, key: &str| {
            value
                .clone()
                .ok_or_else(|| InfrastructureError::Config(format!("{} not set", key)))
        };

        Ok(Self {
            account_sid: require(&config.account_sid, "TWILIO_ACCOUNT_SID")?,
            auth_token: require(&config.auth_token, "TWILIO_AUTH_TOKEN")?,
            from_number: require(&config.from_number, "TWILIO_FROM_NUMBER")?,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            request_timeout_secs,
        })
    }

    /// Endpoint that creates a message
    pub fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base_url, self.account_sid
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageResource {
    pub sid: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TwilioErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: reqwest::Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS service initialized"
        );

        Ok(Self { client, config })
    }

    /// Form fields for a message to `to`
    pub(crate) fn form_params<'a>(&'a self, to: &'a str, body: &'a str) -> [(&'static str, &'a str); 3] {
        [("To", to), ("From", self.config.from_number.as_str()), ("Body", body)]
    }

    /// Turn a non-success response body into a readable reason
    pub(crate) fn describe_failure(status: reqwest::StatusCode, body: &str) -> String {
        match serde_json::from_str::<TwilioErrorBody>(body) {
            Ok(TwilioErrorBody {
                code: Some(code),
                message: Some(message),
            }) => format!("Twilio returned {} (code {}): {}", status, code, message),
            Ok(TwilioErrorBody {
                message: Some(message),
                ..
            }) => format!("Twilio returned {}: {}", status, message),
            _ => format!("Twilio returned {}", status),
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        if message.len() > MAX_BODY_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_BODY_LENGTH
            )));
        }

        let masked = mask_phone_number(phone_number);
        let response = self
            .client
            .post(self.config.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&self.form_params(phone_number, message))
            .send()
            .await
            .map_err(|e| {
                error!(phone = %masked, error = %e, "Twilio request failed");
                InfrastructureError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = Self::describe_failure(status, &body);
            error!(phone = %masked, status = %status, error = %reason, "Twilio rejected SMS");
            return Err(InfrastructureError::Sms(reason));
        }

        let resource: MessageResource = response.json().await?;
        info!(
            provider = "twilio",
            phone = %masked,
            message_id = %resource.sid,
            "SMS sent successfully"
        );
        Ok(resource.sid)
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
