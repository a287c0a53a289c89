//! Fixed-window request limiter keyed by caller address

mod limiter;


pub use limiter::{FixedWindowRateLimiter, RateLimitBucket, RateLimitDecision, RateLimiterConfig};
