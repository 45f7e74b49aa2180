// ABOUTME: Storage error types shared by all storage layers
// ABOUTME: Maps database failures and constraint violations to typed errors

use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Duplicate category name: {0}")]
    DuplicateName(String),
    #[error("Duplicate email: {0}")]
    DuplicateEmail(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Whether the underlying sqlx error is a UNIQUE constraint violation.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        match err {
            sqlx::Error::Database(db_err) => db_err
                .code()
                .map(|code| code == "2067" || code == "1555")
                .unwrap_or(false),
            _ => false,
        }
    }
}
