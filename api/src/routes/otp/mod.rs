//! OTP route handlers
//!
//! - `POST /api/request-otp` issues and sends a code
//! - `POST /api/verify-otp` checks a submitted code

pub mod request_otp;
pub mod verify_otp;

pub use request_otp::request_otp;
pub use verify_otp::verify_otp;
