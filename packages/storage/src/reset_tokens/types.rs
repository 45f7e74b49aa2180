// ABOUTME: Password reset token type
// ABOUTME: Time-limited, single-use credential for password recovery

use chrono::{DateTime, Utc};

/// A stored password reset token. At most one non-expired token exists per
/// email; issuing a new one deletes its predecessors.
#[derive(Debug, Clone)]
pub struct PasswordResetToken {
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    /// Whether this token's expiry is in the past
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
