//! CORS middleware configuration for cross-origin requests.
//!
//! Origins come from `CORS_ALLOWED_ORIGINS`. A `*` entry allows any origin,
//! which is the development default.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use otp_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
        .expose_headers(vec![header::RETRY_AFTER])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .fold(cors, |cors, origin| {
            tracing::info!(origin = %origin, "Adding allowed CORS origin");
            cors.allowed_origin(origin)
        })
}
