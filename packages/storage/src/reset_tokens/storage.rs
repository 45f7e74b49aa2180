// ABOUTME: Storage operations for password reset tokens
// ABOUTME: Token generation, lookup and atomic single-use claiming

use chrono::{DateTime, Utc};
use rand::Rng;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::PasswordResetToken;
use crate::error::StorageError;

pub struct ResetTokenStorage {
    pool: SqlitePool,
}

impl ResetTokenStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Generate a cryptographically secure random reset token.
    /// Returns a hex-encoded 32-byte (256-bit) token.
    pub fn generate_token() -> String {
        let mut rng = rand::thread_rng();
        let random_bytes: [u8; 32] = rng.gen();
        hex::encode(random_bytes)
    }

    /// Persist a new reset token for an email
    pub async fn create_token(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<PasswordResetToken, StorageError> {
        let now = Utc::now();

        debug!("Storing reset token");

        sqlx::query(
            r#"
            INSERT INTO password_reset_tokens (email, token, expires_at, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(email)
        .bind(token)
        .bind(expires_at)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(PasswordResetToken {
            email: email.to_string(),
            token: token.to_string(),
            expires_at,
            created_at: now,
        })
    }

    /// Find a token record by exact token value
    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, StorageError> {
        let row = sqlx::query("SELECT * FROM password_reset_tokens WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(self.row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    /// Delete a single token by exact value, returning the affected row count.
    ///
    /// This is the synchronization point for single-use consumption: of two
    /// concurrent consumers, exactly one observes an affected row.
    pub async fn delete_by_token(&self, token: &str) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM password_reset_tokens WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected())
    }

    /// Delete all tokens for an email, returning the affected row count
    pub async fn delete_by_email(&self, email: &str) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM password_reset_tokens WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected())
    }

    /// Count tokens currently stored for an email
    pub async fn count_for_email(&self, email: &str) -> Result<i64, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM password_reset_tokens WHERE email = ?")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        Ok(count)
    }

    /// Convert a database row to a PasswordResetToken
    fn row_to_token(
        &self,
        row: &sqlx::sqlite::SqliteRow,
    ) -> Result<PasswordResetToken, StorageError> {
        Ok(PasswordResetToken {
            email: row.try_get("email").map_err(StorageError::Sqlx)?,
            token: row.try_get("token").map_err(StorageError::Sqlx)?,
            expires_at: row.try_get("expires_at").map_err(StorageError::Sqlx)?,
            created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
        })
    }
}
