// ABOUTME: HTTP request handlers for authentication operations
// ABOUTME: Registration, sessions and the password reset endpoints

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use recordhub_auth::password::{hash_password, meets_length_requirement, verify_password};
use recordhub_auth::AuthError;
use recordhub_mailer::templates;
use recordhub_storage::sessions::SessionStorage;
use recordhub_storage::users::{PublicUser, UserCreateInput};

use crate::auth::{bearer_token, CurrentUser};
use crate::response::ApiError;
use crate::validation::{validate_email, validate_user_name};
use crate::AppState;

/// How long a login session stays valid
const SESSION_TTL_DAYS: i64 = 30;

/// Request body for registration
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = validate_user_name(&request.name)?;
    let email = validate_email(&request.email)?;
    if !meets_length_requirement(&request.password) {
        return Err(ApiError::from(AuthError::PasswordTooShort));
    }

    info!("Registering user: {}", email);

    let password_hash = hash_password(&request.password)?;
    let user = state
        .db
        .user_storage
        .create_user(UserCreateInput {
            name,
            email,
            password_hash,
        })
        .await?;

    // Best-effort welcome mail; a delivery failure never fails registration
    let dashboard_url = format!("{}/dashboard", state.app_url);
    if let Err(e) = state
        .mailer
        .send(
            &user.email,
            templates::WELCOME_SUBJECT,
            &templates::welcome(&user.name, &dashboard_url),
        )
        .await
    {
        warn!("Failed to send welcome email: {}", e);
    }

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "User created successfully",
            "user": PublicUser::from(user),
        })),
    ))
}

/// Request body for login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Log in and issue a bearer session token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .user_storage
        .get_user_by_email(request.email.trim())
        .await?
        .ok_or(AuthError::InvalidCredentials)
        .map_err(ApiError::from)?;

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(ApiError::from(AuthError::InvalidCredentials));
    }

    info!("User logged in: {}", user.id);

    let token = SessionStorage::generate_token();
    let token_hash = SessionStorage::hash_token(&token);
    let expires_at = Utc::now() + Duration::days(SESSION_TTL_DAYS);
    state
        .db
        .session_storage
        .create_session(&user.id, &token_hash, expires_at)
        .await?;

    Ok(Json(serde_json::json!({
        "token": token,
        "user": PublicUser::from(user),
    })))
}

/// Revoke the presented session
pub async fn logout(
    State(state): State<AppState>,
    current_user: CurrentUser,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    info!("User logged out: {}", current_user.id);

    // The extractor already validated the header
    if let Some(token) = bearer_token(&headers) {
        state
            .db
            .session_storage
            .delete_by_token_hash(&SessionStorage::hash_token(token))
            .await?;
    }

    Ok(Json(serde_json::json!({
        "message": "Logged out successfully"
    })))
}

/// Get the currently authenticated user
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .user_storage
        .get_user(&current_user.id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    Ok(Json(PublicUser::from(user)))
}

/// Request body for requesting a password reset
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Issue a password reset token.
///
/// Responds identically whether or not the account exists; only a missing
/// email field is distinguishable.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if request.email.trim().is_empty() {
        return Err(ApiError::Validation("Email is required".to_string()));
    }

    info!("Password reset requested");

    state.reset_service.issue(request.email.trim()).await?;

    Ok(Json(serde_json::json!({
        "message": "If an account exists, a password reset email has been sent"
    })))
}

/// Request body for completing a password reset
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// Consume a reset token and set a new password
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .reset_service
        .consume(&request.token, &request.password)
        .await?;

    info!("Password reset completed");

    Ok(Json(serde_json::json!({
        "message": "Password has been reset successfully"
    })))
}
