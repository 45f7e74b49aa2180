// ABOUTME: Data layer for RecordHub providing SQLite-backed storage
// ABOUTME: Exposes per-entity storage structs, pagination utilities and errors

pub mod categories;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod pagination;
pub mod records;
pub mod reset_tokens;
pub mod sessions;
pub mod users;

pub use db::DbState;
pub use error::{StorageError, StorageResult};
