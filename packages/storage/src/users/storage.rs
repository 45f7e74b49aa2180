// ABOUTME: User storage layer using SQLite
// ABOUTME: Handles account creation, lookup and credential updates

use chrono::Utc;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use super::types::{User, UserCreateInput};
use crate::error::StorageError;

pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user account
    pub async fn create_user(&self, input: UserCreateInput) -> Result<User, StorageError> {
        let user_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        debug!("Creating user: {}", user_id);

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if StorageError::is_unique_violation(&e) {
                StorageError::DuplicateEmail(input.email.clone())
            } else {
                StorageError::Sqlx(e)
            }
        })?;

        self.get_user(&user_id)
            .await?
            .ok_or(StorageError::NotFound("User"))
    }

    /// Get a user by ID
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(self.row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// Get a user by email
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Ok(Some(self.row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// Update a user's display name
    pub async fn update_name(&self, user_id: &str, name: &str) -> Result<User, StorageError> {
        debug!("Updating name for user: {}", user_id);

        sqlx::query("UPDATE users SET name = ?, updated_at = ? WHERE id = ?")
            .bind(name)
            .bind(Utc::now())
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        self.get_user(user_id)
            .await?
            .ok_or(StorageError::NotFound("User"))
    }

    /// Replace the credential of the account owning `email`.
    ///
    /// Returns the number of affected rows so callers can detect an account
    /// that disappeared between lookup and update.
    pub async fn update_password_by_email(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<u64, StorageError> {
        debug!("Updating credential for account");

        let result = sqlx::query(
            "UPDATE users SET password_hash = ?, updated_at = ? WHERE email = ?",
        )
        .bind(password_hash)
        .bind(Utc::now())
        .bind(email)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected())
    }

    /// Convert a database row to a User
    fn row_to_user(&self, row: &sqlx::sqlite::SqliteRow) -> Result<User, StorageError> {
        Ok(User {
            id: row.try_get("id").map_err(StorageError::Sqlx)?,
            name: row.try_get("name").map_err(StorageError::Sqlx)?,
            email: row.try_get("email").map_err(StorageError::Sqlx)?,
            password_hash: row.try_get("password_hash").map_err(StorageError::Sqlx)?,
            created_at: row.try_get("created_at").map_err(StorageError::Sqlx)?,
            updated_at: row.try_get("updated_at").map_err(StorageError::Sqlx)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbState;

    fn input(name: &str, email: &str) -> UserCreateInput {
        UserCreateInput {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: "hashed".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let db = DbState::init_in_memory().await.unwrap();

        let user = db
            .user_storage
            .create_user(input("Alice", "alice@example.com"))
            .await
            .unwrap();

        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");

        let by_email = db
            .user_storage
            .get_user_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let db = DbState::init_in_memory().await.unwrap();

        db.user_storage
            .create_user(input("Alice", "alice@example.com"))
            .await
            .unwrap();

        let err = db
            .user_storage
            .create_user(input("Other", "alice@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_update_password_by_email() {
        let db = DbState::init_in_memory().await.unwrap();

        db.user_storage
            .create_user(input("Alice", "alice@example.com"))
            .await
            .unwrap();

        let affected = db
            .user_storage
            .update_password_by_email("alice@example.com", "new-hash")
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let user = db
            .user_storage
            .get_user_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.password_hash, "new-hash");

        let affected = db
            .user_storage
            .update_password_by_email("nobody@example.com", "new-hash")
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }
}
