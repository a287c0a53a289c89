//! Unit tests for the mock SMS service

use crate::sms::{MockSmsService, SmsService};
use crate::InfrastructureError;

#[tokio::test]
async fn test_mock_sms_send_success() {
    let service = MockSmsService::with_options(false, false);
    let message_id = service
        .send_sms("+15551234567", "Test message")
        .await
        .unwrap();

    assert!(message_id.starts_with("mock_"));
    assert_eq!(service.get_message_count(), 1);

    let sent = service.last_message_to("+15551234567").unwrap();
    assert_eq!(sent.message_id, message_id);
    assert_eq!(sent.body, "Test message");
}

#[tokio::test]
async fn test_mock_sms_invalid_phone() {
    let service = MockSmsService::with_options(false, false);
    let result = service.send_sms("555-1234", "Test message").await;

    match result {
        Err(InfrastructureError::Sms(msg)) => assert!(msg.contains("Invalid phone number")),
        other => panic!("Expected Sms error, got {:?}", other),
    }
    assert_eq!(service.get_message_count(), 0);
}

#[tokio::test]
async fn test_mock_sms_simulate_failure() {
    let service = MockSmsService::with_options(false, false);
    service.set_simulate_failure(true);

    assert!(service.send_sms("+15551234567", "Test message").await.is_err());
    assert!(service.sent_messages().is_empty());

    service.set_simulate_failure(false);
    assert!(service.send_sms("+15551234567", "Test message").await.is_ok());
    assert_eq!(service.get_message_count(), 1);
}

#[tokio::test]
async fn test_mock_sms_clones_share_outbox() {
    let service = MockSmsService::with_options(false, false);
    let handle = service.clone();

    for i in 1..=3 {
        service
            .send_sms("+15551234567", &format!("Message {}", i))
            .await
            .unwrap();
    }
    assert_eq!(handle.get_message_count(), 3);
    assert_eq!(handle.sent_messages().len(), 3);
    assert_eq!(handle.last_message_to("+15551234567").unwrap().body, "Message 3");
    assert!(handle.last_message_to("+15550000000").is_none());
}
