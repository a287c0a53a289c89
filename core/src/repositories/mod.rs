//! Persistence seams for the OTP lifecycle.

pub mod otp_store;

pub use otp_store::OtpStore;
