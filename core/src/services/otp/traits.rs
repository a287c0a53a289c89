//! Trait for SMS delivery integration

use async_trait::async_trait;

/// Capability that delivers a text message to a phone number
#[async_trait]
pub trait SmsServiceTrait: Send + Sync {
    /// Send `message` to `phone_number`
    ///
    /// # Returns
    /// * `Ok(message_id)` - Provider identifier for the sent message
    /// * `Err(reason)` - Any failure: credentials, quota, transport
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, String>;
}
