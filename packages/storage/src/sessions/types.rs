// ABOUTME: Session types for bearer-token authentication
// ABOUTME: Only the hash of the opaque token is ever persisted

use chrono::{DateTime, Utc};

/// A stored login session. The opaque bearer token itself is handed to the
/// client once at login and never persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub token_hash: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
