// ABOUTME: Dashboard aggregate types
// ABOUTME: Overview counters, recent/upcoming projections and chart buckets

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::records::{Record, RecordPriority, RecordStatus};

/// Owner-scoped counters shown at the top of the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_records: i64,
    pub active_records: i64,
    pub pending_records: i64,
    pub completed_records: i64,
    pub archived_records: i64,
    pub urgent_records: i64,
    pub high_priority_records: i64,
    pub total_categories: i64,
}

/// Reduced projection for the upcoming-due-dates list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingRecord {
    pub id: String,
    pub title: String,
    pub due_date: DateTime<Utc>,
    pub priority: RecordPriority,
}

/// Record count per category, zero-count categories included
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub color: String,
    pub count: i64,
}

/// Record count per status value present in the data
#[derive(Debug, Clone, Serialize)]
pub struct StatusCount {
    pub status: RecordStatus,
    pub count: i64,
}

/// Record count per priority value present in the data
#[derive(Debug, Clone, Serialize)]
pub struct PriorityCount {
    pub priority: RecordPriority,
    pub count: i64,
}

/// Chart buckets for the dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    pub records_by_category: Vec<CategoryCount>,
    pub records_by_status: Vec<StatusCount>,
    pub records_by_priority: Vec<PriorityCount>,
}

/// Full dashboard snapshot, computed fresh on every call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub overview: Overview,
    pub recent_records: Vec<Record>,
    pub upcoming_due_dates: Vec<UpcomingRecord>,
    pub charts: Charts,
}
