// ABOUTME: Dashboard statistics aggregation over records and categories
// ABOUTME: Read-only snapshot queries, always scoped to one owner

use chrono::{Duration, Utc};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{
    CategoryCount, Charts, DashboardStats, Overview, PriorityCount, StatusCount, UpcomingRecord,
};
use crate::error::StorageError;
use crate::records::storage::row_to_record;
use crate::records::{RecordPriority, RecordStatus};

pub struct DashboardStorage {
    pool: SqlitePool,
}

impl DashboardStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Compute the full dashboard snapshot for an owner as of call time
    pub async fn stats(&self, user_id: &str) -> Result<DashboardStats, StorageError> {
        debug!("Computing dashboard stats for user: {}", user_id);

        let records_by_status = self.records_by_status(user_id).await?;
        let records_by_priority = self.records_by_priority(user_id).await?;
        let records_by_category = self.records_by_category(user_id).await?;

        let total_records = records_by_status.iter().map(|s| s.count).sum();
        let status_count = |status: RecordStatus| {
            records_by_status
                .iter()
                .find(|s| s.status == status)
                .map(|s| s.count)
                .unwrap_or(0)
        };
        let priority_count = |priority: RecordPriority| {
            records_by_priority
                .iter()
                .find(|p| p.priority == priority)
                .map(|p| p.count)
                .unwrap_or(0)
        };

        let total_categories: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        let overview = Overview {
            total_records,
            active_records: status_count(RecordStatus::Active),
            pending_records: status_count(RecordStatus::Pending),
            completed_records: status_count(RecordStatus::Completed),
            archived_records: status_count(RecordStatus::Archived),
            urgent_records: priority_count(RecordPriority::Urgent),
            high_priority_records: priority_count(RecordPriority::High),
            total_categories,
        };

        Ok(DashboardStats {
            overview,
            recent_records: self.recent_records(user_id).await?,
            upcoming_due_dates: self.upcoming_due_dates(user_id).await?,
            charts: Charts {
                records_by_category,
                records_by_status,
                records_by_priority,
            },
        })
    }

    /// The 5 most recently created records, with category projection
    async fn recent_records(
        &self,
        user_id: &str,
    ) -> Result<Vec<crate::records::Record>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT
                r.*,
                c.name AS category_name,
                c.color AS category_color,
                c.icon AS category_icon
            FROM records r
            LEFT JOIN categories c ON r.category_id = c.id
            WHERE r.user_id = ?
            ORDER BY r.created_at DESC
            LIMIT 5
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(row_to_record).collect()
    }

    /// The 5 soonest-due, not-yet-completed records due within the next
    /// 7 days (inclusive), ascending by due date
    async fn upcoming_due_dates(
        &self,
        user_id: &str,
    ) -> Result<Vec<UpcomingRecord>, StorageError> {
        let now = Utc::now();
        let horizon = now + Duration::days(7);

        let rows = sqlx::query(
            r#"
            SELECT id, title, due_date, priority
            FROM records
            WHERE user_id = ?
              AND due_date IS NOT NULL
              AND due_date >= ?
              AND due_date <= ?
              AND status != 'COMPLETED'
            ORDER BY due_date ASC
            LIMIT 5
            "#,
        )
        .bind(user_id)
        .bind(now)
        .bind(horizon)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter()
            .map(|row| {
                let priority_raw: String = row.try_get("priority").map_err(StorageError::Sqlx)?;
                let priority = RecordPriority::parse(&priority_raw).ok_or_else(|| {
                    StorageError::Database(format!("Unknown record priority: {}", priority_raw))
                })?;

                Ok(UpcomingRecord {
                    id: row.try_get("id").map_err(StorageError::Sqlx)?,
                    title: row.try_get("title").map_err(StorageError::Sqlx)?,
                    due_date: row.try_get("due_date").map_err(StorageError::Sqlx)?,
                    priority,
                })
            })
            .collect()
    }

    async fn records_by_status(&self, user_id: &str) -> Result<Vec<StatusCount>, StorageError> {
        let rows = sqlx::query(
            "SELECT status, COUNT(*) AS count FROM records WHERE user_id = ? GROUP BY status",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter()
            .map(|row| {
                let status_raw: String = row.try_get("status").map_err(StorageError::Sqlx)?;
                let status = RecordStatus::parse(&status_raw).ok_or_else(|| {
                    StorageError::Database(format!("Unknown record status: {}", status_raw))
                })?;
                Ok(StatusCount {
                    status,
                    count: row.try_get("count").map_err(StorageError::Sqlx)?,
                })
            })
            .collect()
    }

    async fn records_by_priority(
        &self,
        user_id: &str,
    ) -> Result<Vec<PriorityCount>, StorageError> {
        let rows = sqlx::query(
            "SELECT priority, COUNT(*) AS count FROM records WHERE user_id = ? GROUP BY priority",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter()
            .map(|row| {
                let priority_raw: String = row.try_get("priority").map_err(StorageError::Sqlx)?;
                let priority = RecordPriority::parse(&priority_raw).ok_or_else(|| {
                    StorageError::Database(format!("Unknown record priority: {}", priority_raw))
                })?;
                Ok(PriorityCount {
                    priority,
                    count: row.try_get("count").map_err(StorageError::Sqlx)?,
                })
            })
            .collect()
    }

    /// One bucket per category, including categories with no records
    async fn records_by_category(
        &self,
        user_id: &str,
    ) -> Result<Vec<CategoryCount>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT c.name, c.color, COUNT(r.id) AS count
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

        rows.iter()
            .map(|row| {
                Ok(CategoryCount {
                    name: row.try_get("name").map_err(StorageError::Sqlx)?,
                    color: row.try_get("color").map_err(StorageError::Sqlx)?,
                    count: row.try_get("count").map_err(StorageError::Sqlx)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::CategoryCreateInput;
    use crate::db::DbState;
    use crate::records::RecordCreateInput;
    use crate::users::UserCreateInput;

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

    async fn create_record(
        db: &DbState,
        user_id: &str,
        title: &str,
        status: RecordStatus,
        priority: RecordPriority,
    ) {
        db.record_storage
            .create_record(
                user_id,
                RecordCreateInput {
                    title: title.to_string(),
                    status: Some(status),
                    priority: Some(priority),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_status_counts_sum_to_total() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        create_record(&db, &user_id, "a", RecordStatus::Active, RecordPriority::Low).await;
        create_record(&db, &user_id, "b", RecordStatus::Active, RecordPriority::Low).await;
        create_record(&db, &user_id, "c", RecordStatus::Pending, RecordPriority::Low).await;
        create_record(&db, &user_id, "d", RecordStatus::Completed, RecordPriority::Low).await;
        create_record(&db, &user_id, "e", RecordStatus::Archived, RecordPriority::Low).await;

        let stats = db.dashboard_storage.stats(&user_id).await.unwrap();
        let overview = &stats.overview;

        assert_eq!(overview.total_records, 5);
        assert_eq!(
            overview.active_records
                + overview.pending_records
                + overview.completed_records
                + overview.archived_records,
            overview.total_records
        );
        assert_eq!(overview.active_records, 2);
    }

    #[tokio::test]
    async fn test_priority_counts() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        create_record(&db, &user_id, "a", RecordStatus::Active, RecordPriority::Urgent).await;
        create_record(&db, &user_id, "b", RecordStatus::Active, RecordPriority::High).await;
        create_record(&db, &user_id, "c", RecordStatus::Active, RecordPriority::Low).await;

        let stats = db.dashboard_storage.stats(&user_id).await.unwrap();

        assert_eq!(stats.overview.urgent_records, 1);
        assert_eq!(stats.overview.high_priority_records, 1);
    }

    #[tokio::test]
    async fn test_recent_records_capped_at_five() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        for i in 0..7 {
            create_record(
                &db,
                &user_id,
                &format!("r{}", i),
                RecordStatus::Active,
                RecordPriority::Medium,
            )
            .await;
        }

        let stats = db.dashboard_storage.stats(&user_id).await.unwrap();
        assert_eq!(stats.recent_records.len(), 5);
    }

    #[tokio::test]
    async fn test_upcoming_excludes_completed_and_far_dates() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        let soon = Utc::now() + Duration::days(2);
        let far = Utc::now() + Duration::days(30);
        let past = Utc::now() - Duration::days(1);

        for (title, status, due) in [
            ("due soon", RecordStatus::Active, Some(soon)),
            ("done", RecordStatus::Completed, Some(soon)),
            ("far out", RecordStatus::Active, Some(far)),
            ("overdue", RecordStatus::Active, Some(past)),
            ("no date", RecordStatus::Active, None),
        ] {
            db.record_storage
                .create_record(
                    &user_id,
                    RecordCreateInput {
                        title: title.to_string(),
                        status: Some(status),
                        due_date: due,
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        }

        let stats = db.dashboard_storage.stats(&user_id).await.unwrap();
        let titles: Vec<_> = stats
            .upcoming_due_dates
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, ["due soon"]);
    }

    #[tokio::test]
    async fn test_category_chart_includes_empty_categories() {
        let db = DbState::init_in_memory().await.unwrap();
        let user_id = create_user(&db, "alice@example.com").await;

        let work = db
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
        db.category_storage
            .create_category(
                &user_id,
                CategoryCreateInput {
                    name: "Empty".to_string(),
                    description: None,
                    color: None,
                    icon: None,
                },
            )
            .await
            .unwrap();

        db.record_storage
            .create_record(
                &user_id,
                RecordCreateInput {
                    title: "In work".to_string(),
                    category_id: Some(work.category.id.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stats = db.dashboard_storage.stats(&user_id).await.unwrap();
        let by_category = &stats.charts.records_by_category;

        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category[0].name, "Empty");
        assert_eq!(by_category[0].count, 0);
        assert_eq!(by_category[1].name, "Work");
        assert_eq!(by_category[1].count, 1);
    }

    #[tokio::test]
    async fn test_stats_are_owner_scoped_and_fresh() {
        let db = DbState::init_in_memory().await.unwrap();
        let alice = create_user(&db, "alice@example.com").await;
        let bob = create_user(&db, "bob@example.com").await;

        create_record(&db, &alice, "mine", RecordStatus::Active, RecordPriority::Low).await;

        let stats = db.dashboard_storage.stats(&bob).await.unwrap();
        assert_eq!(stats.overview.total_records, 0);

        // Repeated calls reflect intervening mutations
        create_record(&db, &bob, "now mine", RecordStatus::Active, RecordPriority::Low).await;
        let stats = db.dashboard_storage.stats(&bob).await.unwrap();
        assert_eq!(stats.overview.total_records, 1);
    }
}
