// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to SQLite pool and storage layers

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::categories::CategoryStorage;
use crate::dashboard::DashboardStorage;
use crate::error::StorageError;
use crate::records::RecordStorage;
use crate::reset_tokens::ResetTokenStorage;
use crate::sessions::SessionStorage;
use crate::users::UserStorage;

/// Default data directory for RecordHub (~/.recordhub)
pub fn recordhub_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".recordhub")
}

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub user_storage: Arc<UserStorage>,
    pub session_storage: Arc<SessionStorage>,
    pub category_storage: Arc<CategoryStorage>,
    pub record_storage: Arc<RecordStorage>,
    pub reset_token_storage: Arc<ResetTokenStorage>,
    pub dashboard_storage: Arc<DashboardStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let user_storage = Arc::new(UserStorage::new(pool.clone()));
        let session_storage = Arc::new(SessionStorage::new(pool.clone()));
        let category_storage = Arc::new(CategoryStorage::new(pool.clone()));
        let record_storage = Arc::new(RecordStorage::new(pool.clone()));
        let reset_token_storage = Arc::new(ResetTokenStorage::new(pool.clone()));
        let dashboard_storage = Arc::new(DashboardStorage::new(pool.clone()));

        Self {
            pool,
            user_storage,
            session_storage,
            category_storage,
            record_storage,
            reset_token_storage,
            dashboard_storage,
        }
    }

    /// Initialize database state with default configuration
    pub async fn init() -> Result<Self, StorageError> {
        Self::init_with_path(None).await
    }

    /// Initialize database state with optional custom database path
    pub async fn init_with_path(database_path: Option<PathBuf>) -> Result<Self, StorageError> {
        let database_path = database_path.unwrap_or_else(|| recordhub_dir().join("recordhub.db"));

        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());

        debug!("Connecting to database: {}", database_url);

        // Configure connection pool
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&database_url)
            .await
            .map_err(StorageError::Sqlx)?;

        // Configure SQLite settings
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("Database connection established");

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(StorageError::Migration)?;

        debug!("Database migrations completed");

        Ok(Self::new(pool))
    }

    /// Initialize an in-memory database with the full schema.
    ///
    /// The pool is capped at a single connection so every query sees the
    /// same in-memory database.
    pub async fn init_in_memory() -> Result<Self, StorageError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(StorageError::Migration)?;

        Ok(Self::new(pool))
    }
}
