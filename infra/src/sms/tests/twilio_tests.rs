//! Unit tests for the Twilio SMS service

use otp_shared::{SmsConfig, SmsProvider};
use reqwest::StatusCode;

use crate::sms::{SmsService, TwilioConfig, TwilioSmsService};
use crate::InfrastructureError;

fn test_config(base_url: &str) -> TwilioConfig {
    TwilioConfig {
        account_sid: "ACtest_account_sid".to_string(),
        auth_token: "test_auth_token".to_string(),
        from_number: "+15550001111".to_string(),
        api_base_url: base_url.to_string(),
        request_timeout_secs: 2,
    }
}

#[test]
fn test_config_from_sms_config() {
    let sms = SmsConfig {
        provider: SmsProvider::Twilio,
        account_sid: Some("ACtest_account_sid".to_string()),
        auth_token: Some("test_auth_token".to_string()),
        from_number: Some("+15550001111".to_string()),
        api_base_url: "https://api.twilio.com/".to_string(),
    };

    let config = TwilioConfig::from_sms_config(&sms, 7).unwrap();
    assert_eq!(config.request_timeout_secs, 7);
    assert_eq!(
        config.messages_url(),
        "https://api.twilio.com/2010-04-01/Accounts/ACtest_account_sid/Messages.json"
    );
}

#[test]
fn test_config_rejects_sender_without_plus() {
    let sms = SmsConfig {
        provider: SmsProvider::Twilio,
        account_sid: Some("ACtest_account_sid".to_string()),
        auth_token: Some("test_auth_token".to_string()),
        from_number: Some("15550001111".to_string()),
        ..SmsConfig::default()
    };

    assert!(matches!(
        TwilioConfig::from_sms_config(&sms, 10),
        Err(InfrastructureError::Config(_))
    ));
}

#[test]
fn test_form_params() {
    let service = TwilioSmsService::new(test_config("https://api.twilio.com")).unwrap();
    let params = service.form_params("+15551234567", "Your code");

    assert_eq!(
        params,
        [("To", "+15551234567"), ("From", "+15550001111"), ("Body", "Your code")]
    );
}

#[test]
fn test_describe_failure() {
    let body = r#"{"code": 21211, "message": "The 'To' number is not a valid phone number.", "status": 400}"#;
    let reason = TwilioSmsService::describe_failure(StatusCode::BAD_REQUEST, body);
    assert!(reason.contains("21211"));
    assert!(reason.contains("not a valid phone number"));

    let reason = TwilioSmsService::describe_failure(StatusCode::BAD_GATEWAY, "<html>");
    assert_eq!(reason, "Twilio returned 502 Bad Gateway");
}

#[tokio::test]
async fn test_message_too_long_rejected_before_request() {
    let service = TwilioSmsService::new(test_config("http://127.0.0.1:1")).unwrap();
    let body = "x".repeat(1601);

    match service.send_sms("+15551234567", &body).await {
        Err(InfrastructureError::Sms(msg)) => assert!(msg.contains("maximum length")),
        other => panic!("Expected Sms error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_http_error() {
    let service = TwilioSmsService::new(test_config("http://127.0.0.1:1")).unwrap();

    let result = service.send_sms("+15551234567", "Your code").await;
    assert!(matches!(result, Err(InfrastructureError::Http(_))));
}
