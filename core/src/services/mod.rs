//! Business services containing domain logic and use cases.

pub mod clock;
pub mod otp;
pub mod rate_limit;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use otp::{
    OtpService, OtpServiceConfig, RequestCodeResult, SmsServiceTrait, VerifyCodeResult,
};
pub use rate_limit::{FixedWindowRateLimiter, RateLimitBucket, RateLimitDecision, RateLimiterConfig};
