// ABOUTME: Record types for the primary content entity
// ABOUTME: Status/priority enums, filters and partial-update inputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status options for records
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Active,
    Pending,
    Completed,
    Archived,
}

impl Default for RecordStatus {
    fn default() -> Self {
        RecordStatus::Active
    }
}

impl RecordStatus {
    pub const ALL: [RecordStatus; 4] = [
        RecordStatus::Active,
        RecordStatus::Pending,
        RecordStatus::Completed,
        RecordStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "ACTIVE",
            RecordStatus::Pending => "PENDING",
            RecordStatus::Completed => "COMPLETED",
            RecordStatus::Archived => "ARCHIVED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(RecordStatus::Active),
            "PENDING" => Some(RecordStatus::Pending),
            "COMPLETED" => Some(RecordStatus::Completed),
            "ARCHIVED" => Some(RecordStatus::Archived),
            _ => None,
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority levels for records
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Default for RecordPriority {
    fn default() -> Self {
        RecordPriority::Medium
    }
}

impl RecordPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordPriority::Low => "LOW",
            RecordPriority::Medium => "MEDIUM",
            RecordPriority::High => "HIGH",
            RecordPriority::Urgent => "URGENT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LOW" => Some(RecordPriority::Low),
            "MEDIUM" => Some(RecordPriority::Medium),
            "HIGH" => Some(RecordPriority::High),
            "URGENT" => Some(RecordPriority::Urgent),
            _ => None,
        }
    }
}

impl fmt::Display for RecordPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reduced category projection joined onto records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: String,
}

/// The user-owned primary content entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub status: RecordStatus,
    pub priority: RecordPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
    pub category_id: Option<String>,
    pub category: Option<CategoryRef>,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a record
#[derive(Debug, Clone, Default)]
pub struct RecordCreateInput {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub status: Option<RecordStatus>,
    pub priority: Option<RecordPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<String>,
}

/// Input for updating a record; only supplied fields change.
///
/// `due_date` and `category_id` are doubly optional: the outer `None` means
/// "leave unchanged", `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct RecordUpdateInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub status: Option<RecordStatus>,
    pub priority: Option<RecordPriority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub tags: Option<Vec<String>>,
    pub category_id: Option<Option<String>>,
}

/// Sort direction for record listings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Desc
    }
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter for querying records. All clauses are ANDed together; the search
/// clause expands to title/description substring OR exact tag membership.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub status: Option<RecordStatus>,
    pub priority: Option<RecordPriority>,
    pub category_id: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}
