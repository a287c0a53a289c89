//! MySQL connection pool setup

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use otp_shared::DatabaseConfig;

use crate::InfrastructureError;

const CREATE_OTP_RECORDS: &str = include_str!("../../migrations/001_create_otp_records.sql");

/// Open a connection pool for the configured database
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    let url = config
        .url
        .as_deref()
        .ok_or_else(|| InfrastructureError::Config("DATABASE_URL not set".to_string()))?;

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect(url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "MySQL connection pool created"
    );
    Ok(pool)
}

/// Create the `otp_records` table when it does not exist yet
pub async fn ensure_schema(pool: &MySqlPool) -> Result<(), InfrastructureError> {
    sqlx::query(CREATE_OTP_RECORDS).execute(pool).await?;
    Ok(())
}
