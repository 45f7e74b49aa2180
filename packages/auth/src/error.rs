// ABOUTME: Authentication and password recovery errors
// ABOUTME: Token outcomes keep invalid and expired distinct on purpose

use recordhub_storage::StorageError;
use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token and password are required")]
    MissingFields,
    #[error("Password must be at least 8 characters")]
    PasswordTooShort,
    #[error("Invalid or expired reset token")]
    TokenInvalid,
    #[error("Reset token has expired. Please request a new one")]
    TokenExpired,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
