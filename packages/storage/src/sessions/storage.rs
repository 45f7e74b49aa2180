// ABOUTME: Storage operations for login sessions
// ABOUTME: Token generation, hashing, validation and revocation

use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::types::Session;
use crate::error::StorageError;

pub struct SessionStorage {
    pool: SqlitePool,
}

impl SessionStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Generate a cryptographically secure random session token.
    /// Returns a hex-encoded 32-byte token.
    pub fn generate_token() -> String {
        let mut rng = rand::thread_rng();
        let random_bytes: [u8; 32] = rng.gen();
        hex::encode(random_bytes)
    }

    /// Hash a token using SHA-256.
    /// This is what gets stored in the database.
    pub fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Verify a token against a stored hash using constant-time comparison
    pub fn verify_token_hash(token: &str, stored_hash: &str) -> bool {
        use subtle::ConstantTimeEq;

        let computed_hash = Self::hash_token(token);
        computed_hash
            .as_bytes()
            .ct_eq(stored_hash.as_bytes())
            .into()
    }

    /// Create a new session for a user
    pub async fn create_session(
        &self,
        user_id: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Session, StorageError> {
        let session_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!("Creating session for user: {}", user_id);

        sqlx::query(
            r#"
            INSERT INTO sessions (id, token_hash, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&session_id)
        .bind(token_hash)
        .bind(user_id)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(Session {
            id: session_id,
            token_hash: token_hash.to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at,
        })
    }

    /// Find a non-expired session by token hash.
    ///
    /// Expired sessions encountered here are deleted lazily.
    pub async fn find_valid(&self, token_hash: &str) -> Result<Option<Session>, StorageError> {
        let row = sqlx::query("SELECT * FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let session = self.row_to_session(&row)?;

        if session.expires_at < Utc::now() {
            self.delete_by_token_hash(token_hash).await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Delete a session by token hash (logout)
    pub async fn delete_by_token_hash(&self, token_hash: &str) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected())
    }

    /// Convert a database row to a Session
    fn row_to_session(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Session, StorageError> {
        Ok(Session {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            token_hash: row.try_get("token_hash").map_err(StorageError::Sqlx)?,
            user_id: row.try_get("user_id").map_err(StorageError::Sqlx)?,
            created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
            expires_at: row.try_get("expires_at").map_err(StorageError::Sqlx)?,
        })
    }
}
