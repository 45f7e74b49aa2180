// ABOUTME: Dashboard statistics module
// ABOUTME: Re-exports aggregate types and the stats storage

pub mod storage;
pub mod types;

pub use storage::DashboardStorage;
pub use types::{
    CategoryCount, Charts, DashboardStats, Overview, PriorityCount, StatusCount, UpcomingRecord,
};
