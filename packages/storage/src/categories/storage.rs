// ABOUTME: Category storage layer using SQLite
// ABOUTME: Handles owner-scoped CRUD with per-owner name uniqueness

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::types::{
    Category, CategoryCreateInput, CategoryUpdateInput, CategoryWithCount, DEFAULT_CATEGORY_COLOR,
    DEFAULT_CATEGORY_ICON,
};
use crate::error::StorageError;

pub struct CategoryStorage {
    pool: SqlitePool,
}

impl CategoryStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all categories for an owner, with record counts, ordered by name
    pub async fn list_categories(
        &self,
        user_id: &str,
    ) -> Result<Vec<CategoryWithCount>, StorageError> {
        debug!("Fetching categories for user: {}", user_id);

        let rows = sqlx::query(
            r#"
            SELECT c.*, COUNT(r.id) AS record_count
            FROM categories c
            LEFT JOIN records r ON r.category_id = c.id
            WHERE c.user_id = ?
            GROUP BY c.id
            ORDER BY c.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(|row| self.row_to_category_with_count(row)).collect()
    }

    /// Get a single category by ID, scoped to its owner
    pub async fn get_category(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<Option<CategoryWithCount>, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT c.*, COUNT(r.id) AS record_count
            FROM categories c
            LEFT JOIN records r ON r.category_id = c.id
            WHERE c.id = ? AND c.user_id = ?
            GROUP BY c.id
            "#,
        )
        .bind(category_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(self.row_to_category_with_count(&row)?)),
            None => Ok(None),
        }
    }

    /// Look up a category by name for an owner
    pub async fn find_by_name(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<Option<Category>, StorageError> {
        let row = sqlx::query("SELECT * FROM categories WHERE user_id = ? AND name = ?")
            .bind(user_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(self.row_to_category(&row)?)),
            None => Ok(None),
        }
    }

    /// Create a new category.
    ///
    /// The (user_id, name) unique constraint is the authoritative duplicate
    /// check; callers may pre-check by name as a fast-path hint only.
    pub async fn create_category(
        &self,
        user_id: &str,
        input: CategoryCreateInput,
    ) -> Result<CategoryWithCount, StorageError> {
        let category_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let color = input
            .color
            .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());
        let icon = input
            .icon
            .unwrap_or_else(|| DEFAULT_CATEGORY_ICON.to_string());

        debug!("Creating category: {} (name: {})", category_id, input.name);

        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, color, icon, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&category_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&color)
        .bind(&icon)
        .bind(user_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if StorageError::is_unique_violation(&e) {
                StorageError::DuplicateName(input.name.clone())
            } else {
                StorageError::Sqlx(e)
            }
        })?;

        self.get_category(user_id, &category_id)
            .await?
            .ok_or(StorageError::NotFound("Category"))
    }

    /// Update a category; only supplied fields change
    pub async fn update_category(
        &self,
        user_id: &str,
        category_id: &str,
        input: CategoryUpdateInput,
    ) -> Result<CategoryWithCount, StorageError> {
        debug!("Updating category: {}", category_id);

        // Build update query dynamically based on provided fields
        let mut query_parts = Vec::new();

        if input.name.is_some() {
            query_parts.push("name = ?");
        }
        if input.description.is_some() {
            query_parts.push("description = ?");
        }
        if input.color.is_some() {
            query_parts.push("color = ?");
        }
        if input.icon.is_some() {
            query_parts.push("icon = ?");
        }

        if query_parts.is_empty() {
            return self
                .get_category(user_id, category_id)
                .await?
                .ok_or(StorageError::NotFound("Category"));
        }

        query_parts.push("updated_at = ?");

        let update_name = input.name.clone();
        let query_str = format!(
            "UPDATE categories SET {} WHERE id = ? AND user_id = ?",
            query_parts.join(", ")
        );
        let mut query = sqlx::query(&query_str);

        // Bind parameters in the same order
        if let Some(name) = input.name {
            query = query.bind(name);
        }
        if let Some(description) = input.description {
            query = query.bind(description);
        }
        if let Some(color) = input.color {
            query = query.bind(color);
        }
        if let Some(icon) = input.icon {
            query = query.bind(icon);
        }
        query = query.bind(Utc::now()).bind(category_id).bind(user_id);

        query.execute(&self.pool).await.map_err(|e| {
            if StorageError::is_unique_violation(&e) {
                StorageError::DuplicateName(update_name.unwrap_or_default())
            } else {
                StorageError::Sqlx(e)
            }
        })?;

        self.get_category(user_id, category_id)
            .await?
            .ok_or(StorageError::NotFound("Category"))
    }

    /// Delete a category permanently.
    ///
    /// Records referencing it are orphaned (category_id set to NULL by the
    /// foreign key), never deleted.
    pub async fn delete_category(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<u64, StorageError> {
        debug!("Deleting category: {}", category_id);

        let result = sqlx::query("DELETE FROM categories WHERE id = ? AND user_id = ?")
            .bind(category_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected())
    }

    /// Convert a database row to a Category
    fn row_to_category(&self, row: &sqlx::sqlite::SqliteRow) -> Result<Category, StorageError> {
        Ok(Category {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            name: row.try_get("name").map_err(StorageError::Sqlx)?,
            description: row.try_get("description").map_err(StorageError::Sqlx)?,
            color: row.try_get("color").map_err(StorageError::Sqlx)?,
            icon: row.try_get("icon").map_err(StorageError::Sqlx)?,
            user_id: row.try_get("user_id").map_err(StorageError::Sqlx)?,
            created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
            updated_at: row.try_get("updated_at").map_err(StorageError::Sqlx)?,
        })
    }

    fn row_to_category_with_count(
        &self,
        row: &sqlx::sqlite::SqliteRow,
    ) -> Result<CategoryWithCount, StorageError> {
        Ok(CategoryWithCount {
            category: self.row_to_category(row)?,
            record_count: row.try_get("record_count").map_err(StorageError::Sqlx)?,
        })
    }
}
