// ABOUTME: Category types for user-owned record groupings
// ABOUTME: Name is unique per owner; color and icon are presentation metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORY_COLOR: &str = "#6366f1";
pub const DEFAULT_CATEGORY_ICON: &str = "folder";

/// A user-owned named grouping with color/icon metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub icon: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category together with the number of records referencing it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub record_count: i64,
}

/// Input for creating a category
#[derive(Debug, Clone)]
pub struct CategoryCreateInput {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// Input for updating a category; only supplied fields change
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdateInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}
