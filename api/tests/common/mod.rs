//! Shared setup for API tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::{TimeZone, Utc};

use otp_api::AppState;
use otp_core::ManualClock;
use otp_infra::{InMemoryOtpStore, MockSmsService, SmsServiceAdapter};
use otp_shared::AppConfig;

pub const PHONE: &str = "+15551234567";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub sms: MockSmsService,
    pub clock: ManualClock,
}

pub fn context() -> TestContext {
    context_with(AppConfig::default())
}

pub fn context_with(config: AppConfig) -> TestContext {
    let sms = MockSmsService::with_options(false, false);
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
    let state = AppState::new(
        &config,
        Arc::new(SmsServiceAdapter::new(Arc::new(sms.clone()))),
        Arc::new(InMemoryOtpStore::new()),
        Arc::new(clock.clone()),
    );

    TestContext {
        state: web::Data::new(state),
        sms,
        clock,
    }
}

/// The six-digit code in the last SMS sent to `phone`
pub fn sent_code(sms: &MockSmsService, phone: &str) -> String {
    let message = sms.last_message_to(phone).expect("no SMS sent");
    message
        .body
        .split(|c: char| !c.is_ascii_digit())
        .find(|part| part.len() == 6)
        .expect("no code in SMS body")
        .to_string()
}
