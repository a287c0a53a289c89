//! OTP lifecycle module for SMS-based authentication
//!
//! This module owns the per-phone-number OTP record:
//! - Code generation and delivery, then persistence
//! - Cooldown between issuances
//! - Expiry and attempt tracking on verification
//! - Per-phone-number serialization of request and verify

mod config;
mod key_lock;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::SmsServiceTrait;
pub use types::{RequestCodeResult, VerifyCodeResult};
