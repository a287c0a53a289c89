//! Mapping from domain errors to HTTP responses

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use otp_core::{ErrorCategory, OtpError};
use otp_shared::ApiResponse;

/// HTTP status for each error kind
pub fn status_for(error: &OtpError) -> StatusCode {
    match error {
        OtpError::CooldownActive { .. } | OtpError::RateLimited { .. } => {
            StatusCode::TOO_MANY_REQUESTS
        }
        _ => match error.category() {
            ErrorCategory::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCategory::Validation | ErrorCategory::Policy => StatusCode::BAD_REQUEST,
        },
    }
}

/// `{success: false, message}` with the matching status and, when known,
/// a `Retry-After` header
pub fn otp_error_response(error: &OtpError) -> HttpResponse {
    let mut builder = HttpResponse::build(status_for(error));
    if let Some(seconds) = error.retry_after_seconds() {
        builder.insert_header((header::RETRY_AFTER, seconds.max(0).to_string()));
    }
    builder.json(ApiResponse::error(error.to_string()))
}

/// Replace actix's plain-text body for malformed JSON with the API envelope
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected malformed JSON body");

    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json",
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "Request body is too large"
        }
        _ => "Invalid JSON body",
    };
    let response = HttpResponse::BadRequest().json(ApiResponse::error(message));
    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&OtpError::InvalidFormat), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&OtpError::MissingFields), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&OtpError::NotFoundOrExpired), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&OtpError::Expired), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&OtpError::TooManyAttempts), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&OtpError::InvalidCode { remaining_attempts: 2 }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&OtpError::CooldownActive { retry_after_seconds: 60 }),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_for(&OtpError::RateLimited { retry_after_seconds: 60 }),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            status_for(&OtpError::DeliveryFailed { reason: "x".into() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(&OtpError::PersistenceFailed { reason: "x".into() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_retry_after_header() {
        let response = otp_error_response(&OtpError::CooldownActive { retry_after_seconds: 42 });
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers().get(header::RETRY_AFTER).unwrap(), "42");

        let response = otp_error_response(&OtpError::Expired);
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }
}
