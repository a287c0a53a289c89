//! Store trait defining the interface for OTP record persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp_record::OtpRecord;

/// Key-value store for OTP records, keyed by phone number
///
/// Implementations only need point lookups, upserts and deletes by key.
/// Errors are reported as plain strings; the lifecycle service maps them to
/// `OtpError::PersistenceFailed` and logs the detail.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Look up the record for a phone number
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - A record exists (it may be expired or exhausted)
    /// * `Ok(None)` - No record for this number
    async fn find(&self, phone_number: &str) -> Result<Option<OtpRecord>, String>;

    /// Insert the record, or fully replace an existing record for the same number
    async fn upsert(&self, record: &OtpRecord) -> Result<(), String>;

    /// Increment `attempts` and set `last_attempt_at` for an existing record
    ///
    /// # Returns
    /// * `Ok(Some(attempts))` - The attempt count after the increment
    /// * `Ok(None)` - No record for this number
    async fn record_failed_attempt(
        &self,
        phone_number: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<u32>, String>;

    /// Delete the record for a phone number
    ///
    /// # Returns
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - There was nothing to remove
    async fn delete(&self, phone_number: &str) -> Result<bool, String>;

    /// Remove every record whose `expires_at` is before `now`
    ///
    /// # Returns
    /// The number of records removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, String>;
}
