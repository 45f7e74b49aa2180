// ABOUTME: HTTP request handlers for category operations
// ABOUTME: Owner-scoped CRUD with per-owner name uniqueness

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;

use recordhub_storage::categories::{CategoryCreateInput, CategoryUpdateInput};

use crate::auth::CurrentUser;
use crate::response::ApiError;
use crate::validation::{validate_category_description, validate_category_name, validate_icon};
use crate::AppState;

/// List all categories for the current user, with record counts
pub async fn list_categories(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    info!("Listing categories for user: {}", current_user.id);

    let categories = state
        .db
        .category_storage
        .list_categories(&current_user.id)
        .await?;

    Ok(Json(categories))
}

/// Request body for creating a category
#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Create a new category
pub async fn create_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = validate_category_name(&request.name)?;

    info!(
        "Creating category '{}' for user: {}",
        name, current_user.id
    );

    // Fast-path hint; the unique constraint remains the authoritative check
    if state
        .db
        .category_storage
        .find_by_name(&current_user.id, &name)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "Category with this name already exists".to_string(),
        ));
    }

    let input = CategoryCreateInput {
        name,
        description: validate_category_description(request.description)?,
        color: request.color,
        icon: validate_icon(request.icon)?,
    };

    let category = state
        .db
        .category_storage
        .create_category(&current_user.id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Get a single category by ID
pub async fn get_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .db
        .category_storage
        .get_category(&current_user.id, &category_id)
        .await?
        .ok_or(ApiError::NotFound("Category"))?;

    Ok(Json(category))
}

/// Request body for updating a category
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Update an existing category; only supplied fields change
pub async fn update_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CategoryUpdateInput {
        name: request
            .name
            .as_deref()
            .map(validate_category_name)
            .transpose()?,
        description: validate_category_description(request.description)?,
        color: request.color,
        icon: validate_icon(request.icon)?,
    };

    info!("Updating category: {}", category_id);

    let category = state
        .db
        .category_storage
        .update_category(&current_user.id, &category_id, input)
        .await?;

    Ok(Json(category))
}

/// Delete a category. Its records are orphaned, not deleted.
pub async fn delete_category(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(category_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Deleting category: {}", category_id);

    let deleted = state
        .db
        .category_storage
        .delete_category(&current_user.id, &category_id)
        .await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Category"));
    }

    Ok(Json(serde_json::json!({
        "message": "Category deleted successfully"
    })))
}
