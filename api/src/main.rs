use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use otp_api::{create_app, tasks::spawn_purge_task, AppState};
use otp_core::{OtpStore, SystemClock};
use otp_infra::{create_sms_service, InMemoryOtpStore, SmsServiceAdapter};
use otp_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.environment.default_log_filter())),
        )
        .init();

    config.validate().context("Invalid configuration")?;
    info!(environment = %config.environment, "Starting OTP API server");

    let store = build_store(&config).await?;
    let sms_service = create_sms_service(&config.sms, config.otp.delivery_timeout_seconds)
        .context("Failed to initialize SMS provider")?;
    info!(provider = sms_service.provider_name(), "SMS provider ready");

    let state = AppState::new(
        &config,
        Arc::new(SmsServiceAdapter::new(sms_service)),
        store,
        Arc::new(SystemClock),
    );

    spawn_purge_task(
        state.clone(),
        Duration::from_secs(config.rate_limit.cleanup_interval_seconds),
    );

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Server will bind");

    let app_state = web::Data::new(state);
    let cors_config = config.cors.clone();
    let mut server = HttpServer::new(move || create_app(app_state.clone(), &cors_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}

/// MySQL when `DATABASE_URL` is set, otherwise process memory
async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn OtpStore>> {
    if config.database.is_persistent() {
        let pool = otp_infra::create_pool(&config.database)
            .await
            .context("Failed to connect to database")?;
        otp_infra::ensure_schema(&pool)
            .await
            .context("Failed to create otp_records table")?;
        info!("Using MySQL OTP store");
        Ok(Arc::new(otp_infra::MySqlOtpRepository::new(pool)))
    } else {
        info!("DATABASE_URL not set, using in-memory OTP store");
        Ok(Arc::new(InMemoryOtpStore::new()))
    }
}
