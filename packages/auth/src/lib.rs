// ABOUTME: Credential handling and password recovery for RecordHub
// ABOUTME: Argon2 password hashing and the reset token lifecycle

pub mod error;
pub mod password;
pub mod reset;

pub use error::AuthError;
pub use reset::PasswordResetService;
