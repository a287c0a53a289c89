//! Types for OTP service results

use chrono::{DateTime, Utc};

/// Result of issuing a code
#[derive(Debug, Clone)]
pub struct RequestCodeResult {
    /// Phone number the code was sent to
    pub phone_number: String,
    /// The SMS message ID from the provider
    pub message_id: String,
    /// When the issued code expires
    pub expires_at: DateTime<Utc>,
    /// When the caller may request another code
    pub next_request_at: DateTime<Utc>,
}

impl RequestCodeResult {
    /// Confirmation shown to the caller
    pub fn message(&self) -> String {
        format!("OTP sent to {}", self.phone_number)
    }
}

/// Result of a successful verification
#[derive(Debug, Clone)]
pub struct VerifyCodeResult {
    /// Phone number whose code was consumed
    pub phone_number: String,
    /// When verification succeeded
    pub verified_at: DateTime<Utc>,
}

impl VerifyCodeResult {
    /// Confirmation shown to the caller
    pub fn message(&self) -> &'static str {
        "OTP verified successfully"
    }
}
