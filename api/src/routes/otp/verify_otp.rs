use actix_web::{web, HttpResponse};

use otp_shared::ApiResponse;

use crate::dto::VerifyOtpRequest;
use crate::handlers::otp_error_response;
use crate::state::AppState;

/// Handler for POST /api/verify-otp
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "+15551234567", "otp": "123456" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "OTP verified successfully" }
/// ```
///
/// ## Errors
/// All verification failures answer 400 with `success: false`; storage
/// failures answer 500.
pub async fn verify_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    let phone_number = request.phone_number.unwrap_or_default();
    let otp = request.otp.unwrap_or_default();

    match state.otp_service.verify_code(&phone_number, &otp).await {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::success(result.message())),
        Err(error) => otp_error_response(&error),
    }
}
