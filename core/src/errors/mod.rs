//! Domain-specific error types and error handling.

use thiserror::Error;

/// How a failure should be treated by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input shape; the caller can correct it
    Validation,
    /// Cooldown, rate limit, attempt limit or expiry; the caller can wait or re-request
    Policy,
    /// Delivery or storage failure; not attributable to the caller
    Infrastructure,
}

/// Errors produced by the OTP lifecycle and the request rate limiter
///
/// `Display` yields the message shown to callers. Infrastructure variants carry
/// the underlying reason for logging only; it is never part of the message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid phone number format")]
    InvalidFormat,

    #[error("Please wait before requesting a new OTP")]
    CooldownActive { retry_after_seconds: i64 },

    #[error("Too many requests. Please try again later.")]
    RateLimited { retry_after_seconds: i64 },

    #[error("Failed to send OTP")]
    DeliveryFailed { reason: String },

    #[error("Failed to save OTP")]
    PersistenceFailed { reason: String },

    #[error("Phone number and OTP are required")]
    MissingFields,

    #[error("OTP not found or expired")]
    NotFoundOrExpired,

    #[error("OTP has expired")]
    Expired,

    #[error("Too many failed attempts. Please request a new OTP")]
    TooManyAttempts,

    #[error("Invalid OTP")]
    InvalidCode { remaining_attempts: u32 },
}

impl OtpError {
    /// Category of this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            OtpError::InvalidFormat | OtpError::MissingFields => ErrorCategory::Validation,
            OtpError::CooldownActive { .. }
            | OtpError::RateLimited { .. }
            | OtpError::NotFoundOrExpired
            | OtpError::Expired
            | OtpError::TooManyAttempts
            | OtpError::InvalidCode { .. } => ErrorCategory::Policy,
            OtpError::DeliveryFailed { .. } | OtpError::PersistenceFailed { .. } => {
                ErrorCategory::Infrastructure
            }
        }
    }

    /// Stable identifier for programmatic handling and logs
    pub fn code(&self) -> &'static str {
        match self {
            OtpError::InvalidFormat => "INVALID_FORMAT",
            OtpError::CooldownActive { .. } => "COOLDOWN_ACTIVE",
            OtpError::RateLimited { .. } => "RATE_LIMITED",
            OtpError::DeliveryFailed { .. } => "DELIVERY_FAILED",
            OtpError::PersistenceFailed { .. } => "PERSISTENCE_FAILED",
            OtpError::MissingFields => "MISSING_FIELDS",
            OtpError::NotFoundOrExpired => "NOT_FOUND_OR_EXPIRED",
            OtpError::Expired => "EXPIRED",
            OtpError::TooManyAttempts => "TOO_MANY_ATTEMPTS",
            OtpError::InvalidCode { .. } => "INVALID_CODE",
        }
    }

    /// Seconds the caller should wait before retrying, when known
    pub fn retry_after_seconds(&self) -> Option<i64> {
        match self {
            OtpError::CooldownActive { retry_after_seconds }
            | OtpError::RateLimited { retry_after_seconds } => Some(*retry_after_seconds),
            _ => None,
        }
    }

    /// Whether the caller is at fault
    pub fn is_client_error(&self) -> bool {
        self.category() != ErrorCategory::Infrastructure
    }
}

pub type DomainResult<T> = Result<T, OtpError>;
