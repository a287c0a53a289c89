//! In-memory OTP record store
//!
//! Records are keyed by the exact phone number string. Expired records stay
//! until a verification touches them or `purge_expired` sweeps them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use otp_core::{OtpRecord, OtpStore};
use otp_shared::phone::mask_phone_number;

/// OTP store backed by a `HashMap` behind an async read-write lock
#[derive(Default)]
pub struct InMemoryOtpStore {
    records: RwLock<HashMap<String, OtpRecord>>,
}

impl InMemoryOtpStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn find(&self, phone_number: &str) -> Result<Option<OtpRecord>, String> {
        Ok(self.records.read().await.get(phone_number).cloned())
    }

    async fn upsert(&self, record: &OtpRecord) -> Result<(), String> {
        let replaced = self
            .records
            .write()
            .await
            .insert(record.phone_number.clone(), record.clone())
            .is_some();

        debug!(
            phone = %mask_phone_number(&record.phone_number),
            replaced = replaced,
            "Stored OTP record in memory"
        );
        Ok(())
    }

    async fn record_failed_attempt(
        &self,
        phone_number: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<u32>, String> {
        let mut records = self.records.write().await;
        Ok(records.get_mut(phone_number).map(|record| {
            record.register_failed_attempt(at);
            record.attempts
        }))
    }

    async fn delete(&self, phone_number: &str) -> Result<bool, String> {
        Ok(self.records.write().await.remove(phone_number).is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, String> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired(now));
        Ok((before - records.len()) as u64)
    }
}
