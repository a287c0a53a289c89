//! Application factory
//!
//! Builds the actix-web application from shared state so the binary and the
//! tests serve exactly the same routes and middleware.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use otp_shared::{ApiResponse, CorsConfig};

use crate::handlers::json_error_handler;
use crate::middleware::{create_cors, RateLimit};
use crate::routes::health::health_check;
use crate::routes::otp::{request_otp, verify_otp};
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    cors_config: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let rate_limit = RateLimit::new(
        app_state.rate_limiter.clone(),
        app_state.trust_proxy_headers,
    );

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(create_cors(cors_config))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .route(
                    "/request-otp",
                    web::post().to(request_otp).wrap(rate_limit),
                )
                .route("/verify-otp", web::post().to(verify_otp)),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error("Not found"))
}
