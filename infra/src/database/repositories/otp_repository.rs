//! MySQL-backed OTP record store
//!
//! One row per phone number in `otp_records`. Issuing a code replaces the row
//! with `INSERT ... ON DUPLICATE KEY UPDATE`, which also resets `attempts`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, Pool, Row};
use tracing::{debug, error};

use otp_core::{OtpRecord, OtpStore};
use otp_shared::phone::mask_phone_number;

/// OTP record store over a MySQL pool
#[derive(Clone)]
pub struct MySqlOtpRepository {
    /// Database connection pool
    pool: Pool<MySql>,
}

impl MySqlOtpRepository {
    /// Create a new OTP repository
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &MySqlRow) -> Result<OtpRecord, sqlx::Error> {
        Ok(OtpRecord {
            phone_number: row.try_get("phoneNumber")?,
            code: row.try_get("otp")?,
            created_at: row.try_get("createdAt")?,
            expires_at: row.try_get("expiresAt")?,
            attempts: row.try_get("attempts")?,
            last_attempt_at: row.try_get("lastAttemptAt")?,
        })
    }

    fn log_failure(operation: &str, phone_number: &str, err: &sqlx::Error) -> String {
        error!(
            phone = %mask_phone_number(phone_number),
            operation = operation,
            error = %err,
            "OTP database operation failed"
        );
        format!("Failed to {} OTP record: {}", operation, err)
    }
}

#[async_trait]
impl OtpStore for MySqlOtpRepository {
    async fn find(&self, phone_number: &str) -> Result<Option<OtpRecord>, String> {
        let query = r#"
            SELECT phoneNumber, otp, createdAt, expiresAt, attempts, lastAttemptAt
            FROM otp_records
            WHERE phoneNumber = ?
        "#;

        let row = sqlx::query(query)
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::log_failure("read", phone_number, &e))?;

        row.map(|row| Self::row_to_record(&row))
            .transpose()
            .map_err(|e| Self::log_failure("decode", phone_number, &e))
    }

    async fn upsert(&self, record: &OtpRecord) -> Result<(), String> {
        let query = r#"
            INSERT INTO otp_records (phoneNumber, otp, createdAt, expiresAt, attempts, lastAttemptAt)
            VALUES (?, ?, ?, ?, 0, NULL)
            ON DUPLICATE KEY UPDATE
                otp = VALUES(otp),
                createdAt = VALUES(createdAt),
                expiresAt = VALUES(expiresAt),
                attempts = 0,
                lastAttemptAt = NULL
        "#;

        sqlx::query(query)
            .bind(&record.phone_number)
            .bind(&record.code)
            .bind(record.created_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::log_failure("store", &record.phone_number, &e))?;

        debug!(
            phone = %mask_phone_number(&record.phone_number),
            "Stored OTP record in database"
        );
        Ok(())
    }

    async fn record_failed_attempt(
        &self,
        phone_number: &str,
        at: DateTime<Utc>,
    ) -> Result<Option<u32>, String> {
        let update = r#"
            UPDATE otp_records
            SET attempts = attempts + 1, lastAttemptAt = ?
            WHERE phoneNumber = ?
        "#;

        let result = sqlx::query(update)
            .bind(at)
            .bind(phone_number)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::log_failure("update", phone_number, &e))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let attempts: Option<u32> =
            sqlx::query_scalar("SELECT attempts FROM otp_records WHERE phoneNumber = ?")
                .bind(phone_number)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| Self::log_failure("read", phone_number, &e))?;
        Ok(attempts)
    }

    async fn delete(&self, phone_number: &str) -> Result<bool, String> {
        let result = sqlx::query("DELETE FROM otp_records WHERE phoneNumber = ?")
            .bind(phone_number)
            .execute(&self.pool)
            .await
            .map_err(|e| Self::log_failure("delete", phone_number, &e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, String> {
        let result = sqlx::query("DELETE FROM otp_records WHERE expiresAt < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to purge expired OTP records");
                format!("Failed to purge expired OTP records: {}", e)
            })?;

        Ok(result.rows_affected())
    }
}
