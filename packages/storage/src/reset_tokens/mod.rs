// ABOUTME: Password reset token entity module
// ABOUTME: Re-exports reset token types and storage

pub mod storage;
pub mod types;

pub use storage::ResetTokenStorage;
pub use types::PasswordResetToken;
