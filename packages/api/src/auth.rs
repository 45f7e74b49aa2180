// ABOUTME: Authentication context for API requests
// ABOUTME: Resolves bearer session tokens into a request-scoped user id

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use recordhub_storage::sessions::SessionStorage;

use crate::response::ApiError;
use crate::AppState;

/// Current authenticated user, carried explicitly into every core call
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

/// Extract the bearer token from an Authorization header, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(ApiError::unauthorized)?;

        let token_hash = SessionStorage::hash_token(token);
        let session = state
            .db
            .session_storage
            .find_valid(&token_hash)
            .await?
            .ok_or_else(ApiError::unauthorized)?;

        Ok(CurrentUser {
            id: session.user_id,
        })
    }
}
