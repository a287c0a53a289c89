use actix_web::{web, HttpResponse};

use otp_shared::ApiResponse;

use crate::dto::RequestOtpRequest;
use crate::handlers::otp_error_response;
use crate::state::AppState;

/// Handler for POST /api/request-otp
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "+15551234567" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "OTP sent to +15551234567" }
/// ```
///
/// ## Errors
/// - 400 invalid phone number format
/// - 429 cooldown active or too many requests from this address
/// - 500 delivery or storage failure
pub async fn request_otp(
    state: web::Data<AppState>,
    request: web::Json<RequestOtpRequest>,
) -> HttpResponse {
    let phone_number = request.into_inner().phone_number.unwrap_or_default();

    match state.otp_service.request_code(&phone_number).await {
        Ok(result) => HttpResponse::Ok().json(ApiResponse::success(result.message())),
        Err(error) => otp_error_response(&error),
    }
}
