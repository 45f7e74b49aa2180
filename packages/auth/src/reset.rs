// ABOUTME: Password reset token lifecycle: issuance and single-use consumption
// ABOUTME: Uniform issue responses resist account enumeration

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, warn};

use recordhub_mailer::{templates, EmailSender};
use recordhub_storage::reset_tokens::ResetTokenStorage;
use recordhub_storage::users::UserStorage;

use crate::error::AuthError;
use crate::password::{hash_password, meets_length_requirement};

/// How long an issued reset token stays valid
const TOKEN_TTL_HOURS: i64 = 1;

/// Owns the password-reset token lifecycle. No other component creates or
/// mutates reset tokens.
pub struct PasswordResetService {
    users: Arc<UserStorage>,
    tokens: Arc<ResetTokenStorage>,
    mailer: Arc<dyn EmailSender>,
    app_url: String,
}

impl PasswordResetService {
    pub fn new(
        users: Arc<UserStorage>,
        tokens: Arc<ResetTokenStorage>,
        mailer: Arc<dyn EmailSender>,
        app_url: String,
    ) -> Self {
        Self {
            users,
            tokens,
            mailer,
            app_url,
        }
    }

    /// Issue a reset token for an email.
    ///
    /// Returns uniformly for known and unknown addresses: an attacker cannot
    /// tell from the outcome whether an account exists. For a known address,
    /// any previously issued tokens are invalidated, the new token is
    /// persisted with a 1-hour expiry, and the reset link is handed to the
    /// mailer. A delivery failure is logged and swallowed so the caller still
    /// observes the uniform outcome.
    pub async fn issue(&self, email: &str) -> Result<(), AuthError> {
        let Some(user) = self.users.get_user_by_email(email).await? else {
            debug!("Password reset requested for unknown account");
            return Ok(());
        };

        // At most one valid token per email
        self.tokens.delete_by_email(email).await?;

        let token = ResetTokenStorage::generate_token();
        let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
        self.tokens.create_token(email, &token, expires_at).await?;

        let reset_link = format!("{}/auth/reset-password?token={}", self.app_url, token);
        let html = templates::password_reset(&user.name, &reset_link);

        // Token is durable at this point; delivery is best-effort
        if let Err(e) = self
            .mailer
            .send(email, templates::PASSWORD_RESET_SUBJECT, &html)
            .await
        {
            warn!("Failed to send password reset email: {}", e);
        }

        Ok(())
    }

    /// Consume a reset token and set a new password.
    ///
    /// Single-use is enforced by the conditional delete of the token row:
    /// of two concurrent consumers, exactly one claims the row and succeeds.
    pub async fn consume(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        if token.is_empty() || new_password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        if !meets_length_requirement(new_password) {
            return Err(AuthError::PasswordTooShort);
        }

        let Some(reset) = self.tokens.find_by_token(token).await? else {
            return Err(AuthError::TokenInvalid);
        };

        if reset.is_expired() {
            self.tokens.delete_by_token(token).await?;
            return Err(AuthError::TokenExpired);
        }

        // Atomic claim: losing a race means the token is already spent
        if self.tokens.delete_by_token(token).await? == 0 {
            return Err(AuthError::TokenInvalid);
        }

        let password_hash = hash_password(new_password)?;
        let updated = self
            .users
            .update_password_by_email(&reset.email, &password_hash)
            .await?;

        // Any sibling tokens for this email die with the consumed one
        self.tokens.delete_by_email(&reset.email).await?;

        if updated == 0 {
            // Account vanished between issue and consume
            return Err(AuthError::TokenInvalid);
        }

        debug!("Password reset completed");
        Ok(())
    }
}
