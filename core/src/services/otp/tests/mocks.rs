//! Mock implementations for testing the OTP service

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::entities::otp_record::OtpRecord;
use crate::repositories::OtpStore;
use crate::services::clock::ManualClock;
use crate::services::otp::{OtpService, OtpServiceConfig, SmsServiceTrait};

pub const PHONE: &str = "+15551234567";

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

// Mock SMS service for testing
pub struct MockSmsService {
    pub sent_messages: Mutex<Vec<(String, String)>>,
    pub should_fail: AtomicBool,
    pub hang_for: Option<Duration>,
}

impl MockSmsService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(should_fail),
            hang_for: None,
        }
    }

    pub fn hanging(delay: Duration) -> Self {
        Self {
            hang_for: Some(delay),
            ..Self::new(false)
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }

    /// Pull the six-digit code out of the last message sent to `phone`
    pub fn last_code_for(&self, phone: &str) -> Option<String> {
        self.sent_messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == phone)
            .and_then(|(_, body)| {
                body.split(|c: char| !c.is_ascii_digit())
                    .find(|part| part.len() == 6)
                    .map(str::to_string)
            })
    }
}

#[async_trait]
impl SmsServiceTrait for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, String> {
        if let Some(delay) = self.hang_for {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("SMS service error".to_string());
        }
        let mut sent = self.sent_messages.lock().unwrap();
        sent.push((phone_number.to_string(), message.to_string()));
        Ok(format!("mock-msg-{}", sent.len()))
    }
}

// Mock store for testing
#[derive(Default)]
pub struct MockOtpStore {
    pub records: Mutex<HashMap<String, OtpRecord>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub upserts: AtomicUsize,
}

impl MockOtpStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes() -> Self {
        let store = Self::new();
        store.fail_writes.store(true, Ordering::SeqCst);
        store
    }

    pub fn get(&self, phone: &str) -> Option<OtpRecord> {
        self.records.lock().unwrap().get(phone).cloned()
    }

    pub fn insert(&self, record: OtpRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.phone_number.clone(), record);
    }

    fn check_read(&self) -> Result<(), String> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err("Store read error".to_string());
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err("Store write error".to_string());
        }
        Ok(())
    }
}

#[async_trait]
impl OtpStore for MockOtpStore {
    async fn find(&self, phone_number: &str) -> Result<Option<OtpRecord>, String> {
        self.check_read()?;
        Ok(self.get(phone_number))
    }

    async fn upsert(&self, record: &OtpRecord) -> Result<(), String> {
        self.check_write()?;
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.insert(record.clone());
        Ok(())
    }

    async fn record_failed_attempt(
        &self,
        phone_number: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<u32>, String> {
        self.check_write()?;
        let mut records = self.records.lock().unwrap();
        Ok(records.get_mut(phone_number).map(|record| {
            record.register_failed_attempt(at);
            record.attempts
        }))
    }

    async fn delete(&self, phone_number: &str) -> Result<bool, String> {
        self.check_write()?;
        Ok(self.records.lock().unwrap().remove(phone_number).is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, String> {
        self.check_write()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        Ok((before - records.len()) as u64)
    }
}

pub struct Harness {
    pub sms: Arc<MockSmsService>,
    pub store: Arc<MockOtpStore>,
    pub clock: ManualClock,
    pub service: Arc<OtpService<MockSmsService, MockOtpStore>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(MockSmsService::new(false), MockOtpStore::new())
    }

    pub fn with(sms: MockSmsService, store: MockOtpStore) -> Self {
        let sms = Arc::new(sms);
        let store = Arc::new(store);
        let clock = ManualClock::new(t0());
        let service = Arc::new(OtpService::new(
            sms.clone(),
            store.clone(),
            Arc::new(clock.clone()),
            OtpServiceConfig::default(),
        ));
        Self {
            sms,
            store,
            clock,
            service,
        }
    }
}
