// ABOUTME: HTTP request handlers for record operations
// ABOUTME: Owner-scoped CRUD plus the filtered, paginated listing

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;

use recordhub_storage::pagination::{PaginationMeta, PaginationParams, DEFAULT_PAGE_SIZE};
use recordhub_storage::records::{
    Record, RecordCreateInput, RecordFilter, RecordPriority, RecordStatus, RecordUpdateInput,
    SortOrder,
};

use crate::auth::CurrentUser;
use crate::response::ApiError;
use crate::validation::{validate_content, validate_description, validate_tags, validate_title};
use crate::AppState;

/// Helper function to parse an ISO 8601 date string
fn parse_due_date(date_str: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date_str)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Deserializes a field that distinguishes "absent" from "explicitly null"
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Query parameters for listing records
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ListRecordsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub status: Option<RecordStatus>,
    pub priority: Option<RecordPriority>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<SortOrder>,
}

/// Listing response: one page of records plus pagination metadata
#[derive(Serialize)]
pub struct RecordListResponse {
    pub records: Vec<Record>,
    pub pagination: PaginationMeta,
}

/// List records for the current user with filtering and pagination
pub async fn list_records(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListRecordsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pagination = PaginationParams::new(
        query.page.unwrap_or(1),
        query.limit.unwrap_or(DEFAULT_PAGE_SIZE),
    );
    let filter = RecordFilter {
        status: query.status,
        priority: query.priority,
        category_id: query.category_id,
        search: query.search,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
    };

    info!(
        "Listing records for user: {} (page: {})",
        current_user.id,
        pagination.page()
    );

    let (records, total) = state
        .db
        .record_storage
        .list_records(&current_user.id, &filter, &pagination)
        .await?;

    Ok(Json(RecordListResponse {
        records,
        pagination: PaginationMeta::new(&pagination, total),
    }))
}

/// Request body for creating a record
#[derive(Deserialize)]
pub struct CreateRecordRequest {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub status: Option<RecordStatus>,
    pub priority: Option<RecordPriority>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
}

/// Create a new record
pub async fn create_record(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(request): Json<CreateRecordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = RecordCreateInput {
        title: validate_title(&request.title)?,
        description: validate_description(request.description)?,
        content: validate_content(request.content)?,
        status: request.status,
        priority: request.priority,
        due_date: request.due_date.as_deref().and_then(parse_due_date),
        tags: request.tags.map(validate_tags).transpose()?,
        category_id: request.category_id,
    };

    info!("Creating record for user: {}", current_user.id);

    let record = state
        .db
        .record_storage
        .create_record(&current_user.id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Get a single record by ID
pub async fn get_record(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(record_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .db
        .record_storage
        .get_record(&current_user.id, &record_id)
        .await?
        .ok_or(ApiError::NotFound("Record"))?;

    Ok(Json(record))
}

/// Request body for updating a record.
///
/// `dueDate` and `categoryId` distinguish "absent" (leave unchanged) from
/// an explicit null (clear the value).
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateRecordRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub status: Option<RecordStatus>,
    pub priority: Option<RecordPriority>,
    #[serde(rename = "dueDate", deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "categoryId", deserialize_with = "double_option")]
    pub category_id: Option<Option<String>>,
}

/// Update an existing record; only supplied fields change
pub async fn update_record(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(record_id): Path<String>,
    Json(request): Json<UpdateRecordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = RecordUpdateInput {
        title: request
            .title
            .as_deref()
            .map(validate_title)
            .transpose()?,
        description: validate_description(request.description)?,
        content: validate_content(request.content)?,
        status: request.status,
        priority: request.priority,
        due_date: request
            .due_date
            .map(|inner| inner.as_deref().and_then(parse_due_date)),
        tags: request.tags.map(validate_tags).transpose()?,
        category_id: request.category_id,
    };

    info!("Updating record: {}", record_id);

    let record = state
        .db
        .record_storage
        .update_record(&current_user.id, &record_id, input)
        .await?;

    Ok(Json(record))
}

/// Delete a record
pub async fn delete_record(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(record_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Deleting record: {}", record_id);

    let deleted = state
        .db
        .record_storage
        .delete_record(&current_user.id, &record_id)
        .await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Record"));
    }

    Ok(Json(serde_json::json!({
        "message": "Record deleted successfully"
    })))
}
