//! SMS Service Trait Adapter
//!
//! Implements the core `SmsServiceTrait` for any infrastructure `SmsService`.

use std::sync::Arc;

use async_trait::async_trait;
use otp_core::SmsServiceTrait;

use crate::sms::sms_service::SmsService;

/// Adapter that exposes an `SmsService` through the core delivery trait
#[derive(Clone)]
pub struct SmsServiceAdapter {
    inner: Arc<dyn SmsService>,
}

impl SmsServiceAdapter {
    pub fn new(inner: Arc<dyn SmsService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl SmsServiceTrait for SmsServiceAdapter {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, String> {
        self.inner
            .send_sms(phone_number, message)
            .await
            .map_err(|e| e.to_string())
    }
}
