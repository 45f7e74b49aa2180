// ABOUTME: User types for account storage
// ABOUTME: Includes the public projection that never exposes the credential

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A registered account. Carries the password hash and is never serialized
/// to the wire directly; use [`PublicUser`] for responses.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of a user, safe to return to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Input for creating a user. The password is already hashed by the caller.
#[derive(Debug, Clone)]
pub struct UserCreateInput {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
