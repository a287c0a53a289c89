//! OTP record entity for SMS-based authentication.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code ever issued; codes never start with a zero
pub const CODE_MIN: u32 = 100_000;

/// Largest code ever issued
pub const CODE_MAX: u32 = 999_999;

/// One outstanding code per phone number
///
/// The phone number is the identity: issuing a new code replaces the record
/// wholesale and resets `attempts`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Phone number this code was sent to, exactly as submitted
    pub phone_number: String,

    /// The 6-digit code
    pub code: String,

    /// When the record was (re)issued
    pub created_at: DateTime<Utc>,

    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,

    /// Failed verifications so far
    pub attempts: u32,

    /// Time of the most recent failed verification
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl OtpRecord {
    /// Build a fresh record issued at `now`
    pub fn issue(
        phone_number: impl Into<String>,
        code: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            phone_number: phone_number.into(),
            code: code.into(),
            created_at: now,
            expires_at: now + lifetime,
            attempts: 0,
            last_attempt_at: None,
        }
    }

    /// Generate a uniformly random code in `CODE_MIN..=CODE_MAX` using the OS CSPRNG
    pub fn generate_code() -> String {
        OsRng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    /// Generate a code that differs from `previous`
    pub fn generate_code_excluding(previous: Option<&str>) -> String {
        loop {
            let code = Self::generate_code();
            if previous != Some(code.as_str()) {
                return code;
            }
        }
    }

    /// A code is expired strictly after `expires_at`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether the attempt budget is used up
    pub fn attempts_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Live while `now < expires_at` and attempts remain
    pub fn is_live(&self, now: DateTime<Utc>, max_attempts: u32) -> bool {
        now < self.expires_at && !self.attempts_exhausted(max_attempts)
    }

    /// Whether a new code for this number would still be refused at `now`
    pub fn in_cooldown(&self, now: DateTime<Utc>, cooldown: Duration) -> bool {
        now - self.created_at < cooldown
    }

    /// Time left before a new code may be requested, zero once the cooldown has passed
    pub fn cooldown_remaining(&self, now: DateTime<Utc>, cooldown: Duration) -> Duration {
        let remaining = self.created_at + cooldown - now;
        remaining.max(Duration::zero())
    }

    /// Record a failed verification
    pub fn register_failed_attempt(&mut self, now: DateTime<Utc>) {
        self.attempts += 1;
        self.last_attempt_at = Some(now);
    }

    /// Attempts left before the record is discarded
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }

    /// Creation time in milliseconds since the Unix epoch
    pub fn created_at_ms(&self) -> i64 {
        self.created_at.timestamp_millis()
    }

    /// Expiry time in milliseconds since the Unix epoch
    pub fn expires_at_ms(&self) -> i64 {
        self.expires_at.timestamp_millis()
    }
}

// The code must never reach logs, so Debug is written by hand.
impl std::fmt::Debug for OtpRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpRecord")
            .field("phone_number", &otp_shared::phone::mask_phone_number(&self.phone_number))
            .field("code", &"******")
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .field("attempts", &self.attempts)
            .field("last_attempt_at", &self.last_attempt_at)
            .finish()
    }
}
