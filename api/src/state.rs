//! Application state shared by all handlers

use std::sync::Arc;

use otp_core::{
    Clock, FixedWindowRateLimiter, OtpService, OtpServiceConfig, OtpStore, RateLimiterConfig,
    SmsServiceTrait,
};
use otp_shared::AppConfig;

/// Lifecycle service over type-erased delivery and store
pub type DynOtpService = OtpService<dyn SmsServiceTrait, dyn OtpStore>;

/// Services built once at startup and handed to every worker
///
/// Tests build a fresh state per test, so nothing here is global.
#[derive(Clone)]
pub struct AppState {
    /// OTP lifecycle service
    pub otp_service: Arc<DynOtpService>,
    /// Limiter for the request-otp route; `None` when rate limiting is disabled
    pub rate_limiter: Option<Arc<FixedWindowRateLimiter>>,
    /// Take the caller address from `X-Forwarded-For` / `X-Real-IP`
    pub trust_proxy_headers: bool,
}

impl AppState {
    /// Wire the services from configuration and the chosen adapters
    pub fn new(
        config: &AppConfig,
        sms_service: Arc<dyn SmsServiceTrait>,
        store: Arc<dyn OtpStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let otp_service = Arc::new(OtpService::new(
            sms_service,
            store,
            clock.clone(),
            OtpServiceConfig::from(&config.otp),
        ));

        let rate_limiter = config.rate_limit.enabled.then(|| {
            Arc::new(FixedWindowRateLimiter::new(
                RateLimiterConfig::from(&config.rate_limit),
                clock,
            ))
        });

        Self {
            otp_service,
            rate_limiter,
            trust_proxy_headers: config.server.trust_proxy_headers,
        }
    }
}
