//! Main OTP lifecycle service implementation

use std::sync::Arc;

use chrono::Duration;
use constant_time_eq::constant_time_eq;
use otp_shared::phone::{is_valid_phone_number, mask_phone_number};

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::{DomainResult, OtpError};
use crate::repositories::OtpStore;
use crate::services::clock::Clock;

use super::config::OtpServiceConfig;
use super::key_lock::KeyedLocks;
use super::traits::SmsServiceTrait;
use super::types::{RequestCodeResult, VerifyCodeResult};

/// Lifecycle service for per-phone-number OTP records
///
/// Both `request_code` and `verify_code` hold a lock on the phone number for
/// their whole read-then-write sequence. Different numbers do not contend.
pub struct OtpService<S, R>
where
    S: SmsServiceTrait + ?Sized,
    R: OtpStore + ?Sized,
{
    /// SMS service for sending messages
    sms_service: Arc<S>,
    /// Record store keyed by phone number
    store: Arc<R>,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Per-phone-number serialization
    locks: KeyedLocks,
}

impl<S, R> OtpService<S, R>
where
    S: SmsServiceTrait + ?Sized,
    R: OtpStore + ?Sized,
{
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `sms_service` - Delivery capability
    /// * `store` - Record store
    /// * `clock` - Time source
    /// * `config` - Service configuration
    pub fn new(
        sms_service: Arc<S>,
        store: Arc<R>,
        clock: Arc<dyn Clock>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            sms_service,
            store,
            clock,
            config,
            locks: KeyedLocks::new(),
        }
    }

    /// Service configuration
    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a fresh code to a phone number
    ///
    /// This method:
    /// 1. Validates the phone number format
    /// 2. Rejects the request while the previous code is in its cooldown
    /// 3. Generates a new code and delivers it
    /// 4. Persists the record only after delivery succeeded
    ///
    /// # Returns
    ///
    /// * `Ok(RequestCodeResult)` - The code was delivered and stored
    /// * `Err(OtpError)` - `InvalidFormat`, `CooldownActive`, `DeliveryFailed`
    ///   or `PersistenceFailed`
    pub async fn request_code(&self, phone_number: &str) -> DomainResult<RequestCodeResult> {
        if !is_valid_phone_number(phone_number) {
            tracing::debug!(
                phone = %mask_phone_number(phone_number),
                event = "otp_invalid_format",
                "Rejected OTP request with malformed phone number"
            );
            return Err(OtpError::InvalidFormat);
        }

        let _guard = self.locks.lock(phone_number).await;
        let masked = mask_phone_number(phone_number);

        let existing = self.find(phone_number).await?;
        let now = self.clock.now();

        if let Some(record) = &existing {
            if record.in_cooldown(now, self.config.cooldown) {
                let retry_after_seconds =
                    ceil_seconds(record.cooldown_remaining(now, self.config.cooldown));
                tracing::warn!(
                    phone = %masked,
                    retry_after_seconds = retry_after_seconds,
                    event = "otp_cooldown_active",
                    "OTP requested again before cooldown elapsed"
                );
                return Err(OtpError::CooldownActive { retry_after_seconds });
            }
        }

        let code = OtpRecord::generate_code_excluding(existing.as_ref().map(|r| r.code.as_str()));
        let message = self.config.render_message(&code);

        let message_id = match tokio::time::timeout(
            self.config.delivery_timeout,
            self.sms_service.send_sms(phone_number, &message),
        )
        .await
        {
            Ok(Ok(message_id)) => message_id,
            Ok(Err(reason)) => {
                tracing::error!(
                    phone = %masked,
                    error = %reason,
                    event = "otp_delivery_failed",
                    "Failed to deliver OTP"
                );
                return Err(OtpError::DeliveryFailed { reason });
            }
            Err(_) => {
                let reason = format!(
                    "delivery timed out after {}s",
                    self.config.delivery_timeout.as_secs()
                );
                tracing::error!(
                    phone = %masked,
                    error = %reason,
                    event = "otp_delivery_failed",
                    "Failed to deliver OTP"
                );
                return Err(OtpError::DeliveryFailed { reason });
            }
        };

        let record = OtpRecord::issue(phone_number, code, now, self.config.code_lifetime);
        if let Err(reason) = self.store.upsert(&record).await {
            tracing::error!(
                phone = %masked,
                error = %reason,
                message_id = %message_id,
                event = "otp_persistence_failed",
                "OTP was delivered but could not be stored"
            );
            return Err(OtpError::PersistenceFailed { reason });
        }

        tracing::info!(
            phone = %masked,
            message_id = %message_id,
            expires_at = %record.expires_at,
            replaced = existing.is_some(),
            event = "otp_issued",
            "Issued OTP"
        );

        Ok(RequestCodeResult {
            phone_number: record.phone_number,
            message_id,
            expires_at: record.expires_at,
            next_request_at: now + self.config.cooldown,
        })
    }

    /// Verify a submitted code
    ///
    /// Checks run in a fixed order: missing input, absent record, expiry,
    /// exhausted attempts, then the code comparison. The submitted code is
    /// compared exactly as given. Expiry and exhaustion
    /// delete the record before reporting. A match consumes the record; a
    /// mismatch counts against the attempt budget.
    pub async fn verify_code(
        &self,
        phone_number: &str,
        submitted_code: &str,
    ) -> DomainResult<VerifyCodeResult> {
        if phone_number.is_empty() || submitted_code.is_empty() {
            return Err(OtpError::MissingFields);
        }

        let _guard = self.locks.lock(phone_number).await;
        let masked = mask_phone_number(phone_number);

        let record = match self.find(phone_number).await? {
            Some(record) => record,
            None => {
                tracing::info!(
                    phone = %masked,
                    event = "otp_not_found",
                    "Verification attempted without an outstanding OTP"
                );
                return Err(OtpError::NotFoundOrExpired);
            }
        };
        let now = self.clock.now();

        if record.is_expired(now) {
            self.delete(phone_number).await?;
            tracing::info!(
                phone = %masked,
                expired_at = %record.expires_at,
                event = "otp_expired",
                "Discarded expired OTP"
            );
            return Err(OtpError::Expired);
        }

        if record.attempts_exhausted(self.config.max_attempts) {
            self.delete(phone_number).await?;
            tracing::warn!(
                phone = %masked,
                attempts = record.attempts,
                event = "otp_attempts_exhausted",
                "Discarded OTP after too many failed attempts"
            );
            return Err(OtpError::TooManyAttempts);
        }

        if constant_time_eq(submitted_code.as_bytes(), record.code.as_bytes()) {
            self.delete(phone_number).await?;
            tracing::info!(
                phone = %masked,
                event = "otp_verified",
                "OTP verified"
            );
            return Ok(VerifyCodeResult {
                phone_number: record.phone_number,
                verified_at: now,
            });
        }

        let attempts = self
            .store
            .record_failed_attempt(phone_number, now)
            .await
            .map_err(|reason| self.persistence_failed(&masked, reason))?
            .unwrap_or(record.attempts + 1);
        let remaining_attempts = self.config.max_attempts.saturating_sub(attempts);

        tracing::warn!(
            phone = %masked,
            attempts = attempts,
            remaining_attempts = remaining_attempts,
            event = "otp_invalid_code",
            "Invalid OTP submitted"
        );
        Err(OtpError::InvalidCode { remaining_attempts })
    }

    /// Remove expired records from the store
    ///
    /// # Returns
    ///
    /// The number of records removed
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        let now = self.clock.now();
        let removed = self.store.purge_expired(now).await.map_err(|reason| {
            tracing::error!(error = %reason, event = "otp_purge_failed", "Failed to purge expired OTPs");
            OtpError::PersistenceFailed { reason }
        })?;

        if removed > 0 {
            tracing::info!(removed = removed, event = "otp_purged", "Purged expired OTPs");
        }
        Ok(removed)
    }

    /// Phone numbers with a request or verification currently in flight
    pub fn in_flight(&self) -> usize {
        self.locks.active_keys()
    }

    async fn find(&self, phone_number: &str) -> DomainResult<Option<OtpRecord>> {
        self.store
            .find(phone_number)
            .await
            .map_err(|reason| self.persistence_failed(&mask_phone_number(phone_number), reason))
    }

    async fn delete(&self, phone_number: &str) -> DomainResult<()> {
        self.store
            .delete(phone_number)
            .await
            .map(|_| ())
            .map_err(|reason| self.persistence_failed(&mask_phone_number(phone_number), reason))
    }

    fn persistence_failed(&self, masked_phone: &str, reason: String) -> OtpError {
        tracing::error!(
            phone = %masked_phone,
            error = %reason,
            event = "otp_persistence_failed",
            "OTP store operation failed"
        );
        OtpError::PersistenceFailed { reason }
    }
}

/// Whole seconds, rounded up, never below one
fn ceil_seconds(duration: Duration) -> i64 {
    let millis = duration.num_milliseconds();
    ((millis + 999) / 1000).max(1)
}
