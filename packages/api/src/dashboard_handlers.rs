// ABOUTME: HTTP request handler for dashboard statistics
// ABOUTME: Read-only aggregate snapshot for the current user

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

use crate::auth::CurrentUser;
use crate::response::ApiError;
use crate::AppState;

/// Get the dashboard statistics snapshot for the current user
pub async fn get_stats(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("Computing dashboard stats for user: {}", current_user.id);

    let stats = state.db.dashboard_storage.stats(&current_user.id).await?;

    Ok(Json(stats))
}
