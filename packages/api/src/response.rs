// ABOUTME: Shared API error type and HTTP status mapping
// ABOUTME: Converts layer errors to responses without leaking internals

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde_json::json;
use tracing::error;

use recordhub_auth::AuthError;
use recordhub_storage::StorageError;

/// API error taxonomy; each variant owns its HTTP status
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing input (400)
    Validation(String),
    /// Missing or invalid session (401)
    Auth(String),
    /// Resource confirmed absent after ownership check (404)
    NotFound(&'static str),
    /// Duplicate resource (409)
    Conflict(String),
    /// Unexpected failure; detail stays in the logs (500)
    Internal,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Auth("Unauthorized".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Auth(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, ResponseJson(json!({ "error": message }))).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => ApiError::NotFound(what),
            StorageError::DuplicateName(_) => {
                ApiError::Conflict("Category with this name already exists".to_string())
            }
            StorageError::DuplicateEmail(_) => {
                ApiError::Conflict("User with this email already exists".to_string())
            }
            err => {
                error!("Storage failure: {}", err);
                ApiError::Internal
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingFields
            | AuthError::PasswordTooShort
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => ApiError::Validation(err.to_string()),
            AuthError::InvalidCredentials => ApiError::Auth(err.to_string()),
            AuthError::Hash(detail) => {
                error!("Password hashing failure: {}", detail);
                ApiError::Internal
            }
            AuthError::Storage(err) => ApiError::from(err),
        }
    }
}
