//! Rate limiting middleware for the request-otp endpoint
//!
//! Each caller address gets a fixed window of admitted requests. Rejected
//! requests never reach the handler and receive a 429 with `Retry-After`.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use otp_core::{FixedWindowRateLimiter, OtpError, RateLimitDecision};
use otp_shared::ApiResponse;

/// Rate limiter middleware factory
#[derive(Clone)]
pub struct RateLimit {
    limiter: Option<Arc<FixedWindowRateLimiter>>,
    trust_proxy_headers: bool,
}

impl RateLimit {
    /// Limit with `limiter`; `None` lets every request through
    pub fn new(limiter: Option<Arc<FixedWindowRateLimiter>>, trust_proxy_headers: bool) -> Self {
        Self {
            limiter,
            trust_proxy_headers,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            trust_proxy_headers: self.trust_proxy_headers,
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: Option<Arc<FixedWindowRateLimiter>>,
    trust_proxy_headers: bool,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        if let Some(limiter) = &self.limiter {
            let address = client_address(&req, self.trust_proxy_headers);
            if let RateLimitDecision::Rejected { retry_after_seconds } = limiter.check(&address) {
                let error = OtpError::RateLimited { retry_after_seconds };
                let response = HttpResponse::TooManyRequests()
                    .insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()))
                    .json(ApiResponse::error(error.to_string()));
                return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
            }
        }

        Box::pin(async move { service.call(req).await.map(ServiceResponse::map_into_left_body) })
    }
}

/// Address used as the rate limiting key
///
/// Proxy headers are only honored when the deployment says a trusted proxy
/// sets them; otherwise any client could pick its own key.
pub fn client_address(req: &ServiceRequest, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        // Take the first IP from the comma-separated list
        let forwarded = req
            .headers()
            .get("X-Forwarded-For")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }

        let real_ip = req
            .headers()
            .get("X-Real-IP")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        if let Some(ip) = real_ip {
            return ip.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
