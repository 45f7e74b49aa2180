// ABOUTME: HTTP request handlers for user profile operations
// ABOUTME: Profile updates for the current user

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use tracing::info;

use recordhub_storage::users::PublicUser;

use crate::auth::CurrentUser;
use crate::response::ApiError;
use crate::validation::validate_user_name;
use crate::AppState;

/// Request body for updating the current user's profile
#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}

/// Update the current user's display name
pub async fn update_me(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = validate_user_name(&request.name)?;

    info!("Updating profile for user: {}", current_user.id);

    let user = state
        .db
        .user_storage
        .update_name(&current_user.id, &name)
        .await?;

    Ok(Json(PublicUser::from(user)))
}
