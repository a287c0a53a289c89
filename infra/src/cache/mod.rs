//! Process-local OTP record storage
//!
//! Used when no database is configured. Records do not survive a restart.

pub mod otp_storage;


pub use otp_storage::InMemoryOtpStore;
