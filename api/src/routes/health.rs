use actix_web::HttpResponse;

/// Liveness probe; independent of the lifecycle and limiter state
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
