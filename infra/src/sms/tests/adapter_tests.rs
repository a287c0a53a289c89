//! Tests for the core delivery adapter

use std::sync::Arc;

use otp_core::SmsServiceTrait;

use crate::sms::{MockSmsService, SmsServiceAdapter};

#[tokio::test]
async fn test_adapter_forwards_message() {
    let mock = MockSmsService::with_options(false, false);
    let adapter = SmsServiceAdapter::new(Arc::new(mock.clone()));

    let id = adapter.send_sms("+15551234567", "hello").await.unwrap();
    assert_eq!(mock.last_message_to("+15551234567").unwrap().message_id, id);
    assert_eq!(adapter.provider_name(), "Mock");
}

#[tokio::test]
async fn test_adapter_flattens_error_to_string() {
    let mock = MockSmsService::with_options(false, true);
    let adapter = SmsServiceAdapter::new(Arc::new(mock));

    let err = adapter.send_sms("+15551234567", "hello").await.unwrap_err();
    assert_eq!(err, "SMS service error: Simulated SMS sending failure");
}
