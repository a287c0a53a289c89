//! # Infrastructure Layer
//!
//! Concrete implementations of the seams the OTP core depends on:
//!
//! - **Store**: an in-memory record store and a MySQL repository using SQLx
//! - **SMS**: a mock provider for development and a Twilio REST client
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL record store (default)
//! - `twilio-sms`: Enable the Twilio SMS provider (default)

/// In-memory record store
pub mod cache;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// SMS service module - External SMS providers
pub mod sms;

pub use cache::InMemoryOtpStore;
#[cfg(feature = "mysql")]
pub use database::{create_pool, ensure_schema, MySqlOtpRepository};
pub use sms::{create_sms_service, MockSmsService, SmsService, SmsServiceAdapter};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}

impl From<otp_shared::ConfigError> for InfrastructureError {
    fn from(err: otp_shared::ConfigError) -> Self {
        InfrastructureError::Config(err.to_string())
    }
}
