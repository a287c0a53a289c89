pub mod otp;

pub use otp::{RequestOtpRequest, VerifyOtpRequest};
