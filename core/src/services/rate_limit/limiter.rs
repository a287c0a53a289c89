//! In-memory fixed-window rate limiter
//!
//! Buckets live in process memory and are lost on restart. A caller may see
//! up to twice the limit in a short burst that straddles a window boundary.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use otp_shared::config::RateLimitConfig;

use crate::services::clock::Clock;

/// Limiter settings
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Requests admitted per window
    pub max_requests: u32,
    /// Window length
    pub window: Duration,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::from(&RateLimitConfig::default())
    }
}

impl From<&RateLimitConfig> for RateLimiterConfig {
    fn from(config: &RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: Duration::seconds(config.window_seconds),
        }
    }
}

/// Counter for one caller address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitBucket {
    /// Requests admitted in the current window
    pub count: u32,
    /// Start of the current window
    pub window_start: DateTime<Utc>,
}

impl RateLimitBucket {
    fn window_elapsed(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now - self.window_start > window
    }
}

/// Outcome of a limiter check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Admitted; `remaining` more requests fit in this window
    Allowed { remaining: u32 },
    /// Rejected; the window resets after `retry_after_seconds`
    Rejected { retry_after_seconds: i64 },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Fixed-window counter per caller address
pub struct FixedWindowRateLimiter {
    config: RateLimiterConfig,
    clock: Arc<dyn Clock>,
    buckets: Mutex<HashMap<String, RateLimitBucket>>,
}

impl FixedWindowRateLimiter {
    pub fn new(config: RateLimiterConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    /// Count a request from `address` and decide whether to admit it
    ///
    /// The check and the increment happen under one lock. A rejected request
    /// is not counted.
    pub fn check(&self, address: &str) -> RateLimitDecision {
        let now = self.clock.now();
        let limit = self.config.max_requests;
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);

        let bucket = buckets
            .entry(address.to_string())
            .or_insert(RateLimitBucket {
                count: 0,
                window_start: now,
            });

        if bucket.window_elapsed(now, self.config.window) {
            bucket.count = 0;
            bucket.window_start = now;
        }

        if bucket.count >= limit {
            let reset_at = bucket.window_start + self.config.window;
            let retry_after_seconds = ((reset_at - now).num_milliseconds() + 999) / 1000;
            let retry_after_seconds = retry_after_seconds.max(1);
            tracing::warn!(
                client = %address,
                count = bucket.count,
                limit = limit,
                retry_after_seconds = retry_after_seconds,
                event = "rate_limit_exceeded",
                "Request rate limit exceeded"
            );
            return RateLimitDecision::Rejected { retry_after_seconds };
        }

        bucket.count += 1;
        RateLimitDecision::Allowed {
            remaining: limit - bucket.count,
        }
    }

    /// Shorthand for `check(address).is_allowed()`
    pub fn admit(&self, address: &str) -> bool {
        self.check(address).is_allowed()
    }

    /// Current bucket for an address, if one is tracked
    pub fn bucket(&self, address: &str) -> Option<RateLimitBucket> {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(address)
            .copied()
    }

    /// Drop buckets whose window has elapsed
    ///
    /// # Returns
    /// The number of buckets removed
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let window = self.config.window;
        let mut buckets = self.buckets.lock().unwrap_or_else(PoisonError::into_inner);
        let before = buckets.len();
        buckets.retain(|_, bucket| !bucket.window_elapsed(now, window));
        before - buckets.len()
    }

    /// Number of addresses currently tracked
    pub fn tracked_addresses(&self) -> usize {
        self.buckets.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
