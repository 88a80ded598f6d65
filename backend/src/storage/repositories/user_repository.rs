use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::user::{NewUser, User};
use crate::storage::connection::DbConnection;

/// Repository for user accounts
#[derive(Clone)]
pub struct UserRepository {
    db: DbConnection,
}

impl UserRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store a new user and return it with its assigned id
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now().naive_utc())
        .fetch_one(self.db.pool())
        .await?;

        Ok(map_user_row(&row))
    }

    #[cfg(test)]
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_user_row))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_user_row))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_user_row))
    }

    /// Delete a user together with everything the user owns.
    /// Runs in one transaction so a failure leaves no orphaned rows behind.
    /// Returns false if the user did not exist.
    pub async fn delete_user(&self, user_id: i64) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        for table in ["sessions", "expenses", "budgets", "goals"] {
            sqlx::query(&format!("DELETE FROM {} WHERE user_id = ?", table))
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}

pub(crate) fn map_user_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> UserRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        UserRepository::new(db)
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$v=19$test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let repo = setup_test().await;

        let created = repo.create_user(&new_user("alice", "alice@example.com")).await.unwrap();
        assert!(created.id > 0);

        let by_email = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
        let by_username = repo.find_by_username("alice").await.unwrap().unwrap();
        let by_id = repo.get_user(created.id).await.unwrap().unwrap();

        assert_eq!(by_email, created);
        assert_eq!(by_username, created);
        assert_eq!(by_id, created);
        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_by_store() {
        let repo = setup_test().await;

        repo.create_user(&new_user("alice", "same@example.com")).await.unwrap();
        let duplicate = repo.create_user(&new_user("alice2", "same@example.com")).await;

        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_delete_missing_user_returns_false() {
        let repo = setup_test().await;
        assert!(!repo.delete_user(42).await.unwrap());
    }
}
