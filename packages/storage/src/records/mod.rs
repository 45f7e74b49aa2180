// ABOUTME: Record entity module
// ABOUTME: Re-exports record types and the query/storage layer

pub mod storage;
pub mod types;

pub use storage::RecordStorage;
pub use types::{
    CategoryRef, Record, RecordCreateInput, RecordFilter, RecordPriority, RecordStatus,
    RecordUpdateInput, SortOrder,
};
