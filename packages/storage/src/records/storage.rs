// ABOUTME: Record storage and query layer using SQLite
// ABOUTME: Owner-scoped CRUD plus the filter/sort/paginate engine

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::types::{
    CategoryRef, Record, RecordCreateInput, RecordFilter, RecordPriority, RecordStatus,
    RecordUpdateInput, SortOrder,
};
use crate::error::StorageError;
use crate::pagination::PaginationParams;

/// Columns a listing may be sorted by. Anything else falls back to the
/// creation timestamp; request values are never interpolated into SQL.
fn sort_column(sort_by: Option<&str>) -> &'static str {
    match sort_by.unwrap_or("createdAt") {
        "title" => "title",
        "status" => "status",
        "priority" => "priority",
        "dueDate" => "due_date",
        "updatedAt" => "updated_at",
        _ => "created_at",
    }
}

const RECORD_SELECT: &str = r#"
    SELECT
        r.*,
        c.name AS category_name,
        c.color AS category_color,
        c.icon AS category_icon
    FROM records r
    LEFT JOIN categories c ON r.category_id = c.id
"#;

pub struct RecordStorage {
    pool: SqlitePool,
}

impl RecordStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List one page of an owner's records matching the filter.
    ///
    /// Returns the page plus the filtered total count. Requesting a page
    /// beyond the last yields an empty page, not an error.
    pub async fn list_records(
        &self,
        user_id: &str,
        filter: &RecordFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Record>, i64), StorageError> {
        debug!(
            "Fetching records for user: {} (page: {}, limit: {})",
            user_id,
            pagination.page(),
            pagination.limit()
        );

        let mut conditions = vec!["r.user_id = ?".to_string()];
        let mut binds: Vec<String> = vec![user_id.to_string()];

        if let Some(status) = filter.status {
            conditions.push("r.status = ?".to_string());
            binds.push(status.as_str().to_string());
        }
        if let Some(priority) = filter.priority {
            conditions.push("r.priority = ?".to_string());
            binds.push(priority.as_str().to_string());
        }
        if let Some(category_id) = &filter.category_id {
            conditions.push("r.category_id = ?".to_string());
            binds.push(category_id.clone());
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            // Title/description match on substring, tags on exact membership;
            // all three are case-insensitive.
            conditions.push(
                "(r.title LIKE ? OR r.description LIKE ? \
                 OR EXISTS (SELECT 1 FROM json_each(r.tags) \
                 WHERE lower(json_each.value) = lower(?)))"
                    .to_string(),
            );
            let pattern = format!("%{}%", search);
            binds.push(pattern.clone());
            binds.push(pattern);
            binds.push(search.to_string());
        }

        let where_clause = conditions.join(" AND ");

        let count_sql = format!("SELECT COUNT(*) FROM records r WHERE {}", where_clause);
        let mut count_query = sqlx::query_scalar(&count_sql);
        for bind in &binds {
            count_query = count_query.bind(bind);
        }
        let total: i64 = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let order = filter.sort_order.unwrap_or_default();
        let select_sql = format!(
            "{} WHERE {} ORDER BY r.{} {} LIMIT {} OFFSET {}",
            RECORD_SELECT,
            where_clause,
            sort_column(filter.sort_by.as_deref()),
            order.as_sql(),
            pagination.limit(),
            pagination.offset()
        );

        let mut select_query = sqlx::query(&select_sql);
        for bind in &binds {
            select_query = select_query.bind(bind);
        }
        let rows = select_query
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let records = rows
            .iter()
            .map(row_to_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((records, total))
    }

    /// Get a single record by ID, scoped to its owner
    pub async fn get_record(
        &self,
        user_id: &str,
        record_id: &str,
    ) -> Result<Option<Record>, StorageError> {
        let sql = format!("{} WHERE r.id = ? AND r.user_id = ?", RECORD_SELECT);

        let row = sqlx::query(&sql)
            .bind(record_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    /// Create a new record
    pub async fn create_record(
        &self,
        user_id: &str,
        input: RecordCreateInput,
    ) -> Result<Record, StorageError> {
        let record_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let status = input.status.unwrap_or_default();
        let priority = input.priority.unwrap_or_default();
        let tags = serde_json::to_string(&input.tags.unwrap_or_default())?;

        debug!("Creating record: {} for user: {}", record_id, user_id);

        sqlx::query(
            r#"
            INSERT INTO records (
                id, title, description, content, status, priority,
                due_date, tags, category_id, user_id, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.content)
        .bind(status.as_str())
        .bind(priority.as_str())
        .bind(input.due_date)
        .bind(&tags)
        .bind(&input.category_id)
        .bind(user_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        self.get_record(user_id, &record_id)
            .await?
            .ok_or(StorageError::NotFound("Record"))
    }

    /// Update a record; only supplied fields change
    pub async fn update_record(
        &self,
        user_id: &str,
        record_id: &str,
        input: RecordUpdateInput,
    ) -> Result<Record, StorageError> {
        debug!("Updating record: {}", record_id);

        // Build update query dynamically based on provided fields
        let mut query_parts = Vec::new();

        if input.title.is_some() {
            query_parts.push("title = ?");
        }
        if input.description.is_some() {
            query_parts.push("description = ?");
        }
        if input.content.is_some() {
            query_parts.push("content = ?");
        }
        if input.status.is_some() {
            query_parts.push("status = ?");
        }
        if input.priority.is_some() {
            query_parts.push("priority = ?");
        }
        if input.due_date.is_some() {
            query_parts.push("due_date = ?");
        }
        if input.tags.is_some() {
            query_parts.push("tags = ?");
        }
        if input.category_id.is_some() {
            query_parts.push("category_id = ?");
        }

        if query_parts.is_empty() {
            return self
                .get_record(user_id, record_id)
                .await?
                .ok_or(StorageError::NotFound("Record"));
        }

        query_parts.push("updated_at = ?");

        let query_str = format!(
            "UPDATE records SET {} WHERE id = ? AND user_id = ?",
            query_parts.join(", ")
        );
        let mut query = sqlx::query(&query_str);

        // Bind parameters in the same order
        if let Some(title) = input.title {
            query = query.bind(title);
        }
        if let Some(description) = input.description {
            query = query.bind(description);
        }
        if let Some(content) = input.content {
            query = query.bind(content);
        }
        if let Some(status) = input.status {
            query = query.bind(status.as_str());
        }
        if let Some(priority) = input.priority {
            query = query.bind(priority.as_str());
        }
        if let Some(due_date) = input.due_date {
            query = query.bind(due_date);
        }
        if let Some(tags) = input.tags {
            query = query.bind(serde_json::to_string(&tags)?);
        }
        if let Some(category_id) = input.category_id {
            query = query.bind(category_id);
        }
        query = query.bind(Utc::now()).bind(record_id).bind(user_id);

        query
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        self.get_record(user_id, record_id)
            .await?
            .ok_or(StorageError::NotFound("Record"))
    }

    /// Delete a record permanently, returning the affected row count
    pub async fn delete_record(
        &self,
        user_id: &str,
        record_id: &str,
    ) -> Result<u64, StorageError> {
        debug!("Deleting record: {}", record_id);

        let result = sqlx::query("DELETE FROM records WHERE id = ? AND user_id = ?")
            .bind(record_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected())
    }
}

/// Convert a joined database row to a Record
pub(crate) fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<Record, StorageError> {
    let status_raw: String = row.try_get("status").map_err(StorageError::Sqlx)?;
    let status = RecordStatus::parse(&status_raw)
        .ok_or_else(|| StorageError::Database(format!("Unknown record status: {}", status_raw)))?;

    let priority_raw: String = row.try_get("priority").map_err(StorageError::Sqlx)?;
    let priority = RecordPriority::parse(&priority_raw).ok_or_else(|| {
        StorageError::Database(format!("Unknown record priority: {}", priority_raw))
    })?;

    let tags: Vec<String> = row
        .try_get::<Option<String>, _>("tags")
        .map_err(StorageError::Sqlx)?
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default();

    let category_id: Option<String> = row.try_get("category_id").map_err(StorageError::Sqlx)?;
    let category = match (&category_id, row.try_get::<Option<String>, _>("category_name")) {
        (Some(id), Ok(Some(name))) => Some(CategoryRef {
            id: id.clone(),
            name,
            color: row.try_get("category_color").map_err(StorageError::Sqlx)?,
            icon: row.try_get("category_icon").map_err(StorageError::Sqlx)?,
        }),
        _ => None,
    };

    Ok(Record {
        id: row.try_get("id").map_err(StorageError::Sqlx)?,
        title: row.try_get("title").map_err(StorageError::Sqlx)?,
        description: row.try_get("description").map_err(StorageError::Sqlx)?,
        content: row.try_get("content").map_err(StorageError::Sqlx)?,
        status,
        priority,
        due_date: row.try_get("due_date").map_err(StorageError::Sqlx)?,
        tags,
        category_id,
        category,
        user_id: row.try_get("user_id").map_err(StorageError::Sqlx)?,
        created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
        updated_at: row.try_get("updated_at").map_err(StorageError::Sqlx)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryCreateInput;
    use crate::db::DbState;
    use crate::users::UserCreateInput;
    use chrono::Duration;

    async fn create_user(db: &DbState, email: &str) -> String {
        db.user_storage
            .create_user(UserCreateInput {
                name: "Test".to_string(),
                email: email.to_string(),
                password_hash: "hashed".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    fn titled(title: &str) -> RecordCreateInput {
        RecordCreateInput {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        let record = db
            .record_storage
            .create_record(&user_id, titled("First"))
            .await
            .unwrap();

        assert_eq!(record.status, RecordStatus::Active);
        assert_eq!(record.priority, RecordPriority::Medium);
        assert!(record.tags.is_empty());
        assert!(record.category.is_none());
    }

    #[tokio::test]
    async fn test_list_pagination_counts() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        for i in 0..25 {
            db.record_storage
                .create_record(&user_id, titled(&format!("Record {}", i)))
                .await
                .unwrap();
        }

        let (page, total) = db
            .record_storage
            .list_records(
                &user_id,
                &RecordFilter::default(),
                &PaginationParams::new(1, 10),
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(total, 25);

        let (page, total) = db
            .record_storage
            .list_records(
                &user_id,
                &RecordFilter::default(),
                &PaginationParams::new(3, 10),
            )
            .await
            .unwrap();
        assert_eq!(page.len(), 5);
        assert_eq!(total, 25);

        // Beyond the last page: empty list, accurate total
        let (page, total) = db
            .record_storage
            .list_records(
                &user_id,
                &RecordFilter::default(),
                &PaginationParams::new(4, 10),
            )
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 25);
    }

    #[tokio::test]
    async fn test_filters_are_anded() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        db.record_storage
            .create_record(
                &user_id,
                RecordCreateInput {
                    title: "Urgent active".to_string(),
                    status: Some(RecordStatus::Active),
                    priority: Some(RecordPriority::Urgent),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        db.record_storage
            .create_record(
                &user_id,
                RecordCreateInput {
                    title: "Urgent archived".to_string(),
                    status: Some(RecordStatus::Archived),
                    priority: Some(RecordPriority::Urgent),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let filter = RecordFilter {
            status: Some(RecordStatus::Active),
            priority: Some(RecordPriority::Urgent),
            ..Default::default()
        };
        let (page, total) = db
            .record_storage
            .list_records(&user_id, &filter, &PaginationParams::default())
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(page[0].title, "Urgent active");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_matches_tags_exactly() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        db.record_storage
            .create_record(&user_id, titled("Quarterly report"))
            .await
            .unwrap();
        db.record_storage
            .create_record(
                &user_id,
                RecordCreateInput {
                    title: "Numbers".to_string(),
                    description: Some("QUARTERLY numbers".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        db.record_storage
            .create_record(
                &user_id,
                RecordCreateInput {
                    title: "Tagged".to_string(),
                    tags: Some(vec!["Quarterly".to_string()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let filter = RecordFilter {
            search: Some("quarterly".to_string()),
            ..Default::default()
        };
        let (_, total) = db
            .record_storage
            .list_records(&user_id, &filter, &PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(total, 3);

        // Substring matches title/description but not tag membership
        let filter = RecordFilter {
            search: Some("quart".to_string()),
            ..Default::default()
        };
        let (_, total) = db
            .record_storage
            .list_records(&user_id, &filter, &PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn test_sorting_and_whitelist_fallback() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        for title in ["Charlie", "Alpha", "Bravo"] {
            db.record_storage
                .create_record(&user_id, titled(title))
                .await
                .unwrap();
        }

        let filter = RecordFilter {
            sort_by: Some("title".to_string()),
            sort_order: Some(SortOrder::Asc),
            ..Default::default()
        };
        let (page, _) = db
            .record_storage
            .list_records(&user_id, &filter, &PaginationParams::default())
            .await
            .unwrap();
        let titles: Vec<_> = page.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Alpha", "Bravo", "Charlie"]);

        // Unknown sort column falls back to created_at instead of failing
        let filter = RecordFilter {
            sort_by: Some("password_hash; DROP TABLE records".to_string()),
            ..Default::default()
        };
        let (page, _) = db
            .record_storage
            .list_records(&user_id, &filter, &PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(page.len(), 3);
    }

    #[tokio::test]
    async fn test_partial_update_and_clearing() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        let due = Utc::now() + Duration::days(3);
        let record = db
            .record_storage
            .create_record(
                &user_id,
                RecordCreateInput {
                    title: "Original".to_string(),
                    description: Some("Keep me".to_string()),
                    due_date: Some(due),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        // Only the title is supplied; everything else is untouched
        let updated = db
            .record_storage
            .update_record(
                &user_id,
                &record.id,
                RecordUpdateInput {
                    title: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.description.as_deref(), Some("Keep me"));
        assert!(updated.due_date.is_some());

        // Explicit null clears the due date
        let updated = db
            .record_storage
            .update_record(
                &user_id,
                &record.id,
                RecordUpdateInput {
                    due_date: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.due_date.is_none());
    }

    #[tokio::test]
    async fn test_category_join_and_orphaning() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        let category = db
            .category_storage
            .create_category(
                &user_id,
                CategoryCreateInput {
                    name: "Work".to_string(),
                    description: None,
                    color: None,
                    icon: None,
                },
            )
            .await
            .unwrap();

        let record = db
            .record_storage
            .create_record(
                &user_id,
                RecordCreateInput {
                    title: "Categorized".to_string(),
                    category_id: Some(category.category.id.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let joined = record.category.unwrap();
        assert_eq!(joined.name, "Work");

        // Deleting the category orphans the record, it does not cascade
        db.category_storage
            .delete_category(&user_id, &category.category.id)
            .await
            .unwrap();

        let record = db
            .record_storage
            .get_record(&user_id, &record.id)
            .await
            .unwrap()
            .unwrap();
        assert!(record.category_id.is_none());
        assert!(record.category.is_none());
    }

    #[tokio::test]
    async fn test_records_are_owner_scoped() {
        let db = DbState::init_in_memory().await.unwrap();
        let alice = create_user(&db, "alice@example.com").await;
        let bob = create_user(&db, "bob@example.com").await;

        let record = db
            .record_storage
            .create_record(&alice, titled("Private"))
            .await
            .unwrap();

        assert!(db
            .record_storage
            .get_record(&bob, &record.id)
            .await
            .unwrap()
            .is_none());

        let (page, total) = db
            .record_storage
            .list_records(&bob, &RecordFilter::default(), &PaginationParams::default())
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(total, 0);

        assert_eq!(
            db.record_storage.delete_record(&bob, &record.id).await.unwrap(),
            0
        );
    }
}
