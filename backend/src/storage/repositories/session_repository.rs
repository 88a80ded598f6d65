use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use sqlx::Row;

use crate::domain::models::user::User;
use crate::storage::connection::DbConnection;
use crate::storage::repositories::user_repository::map_user_row;

/// Repository for login sessions
#[derive(Clone)]
pub struct SessionRepository {
    db: DbConnection,
}

impl SessionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Record a new session token for a user, valid until `expires_at` (UTC)
    pub async fn create_session(&self, token: &str, user_id: i64, expires_at: NaiveDateTime) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(Utc::now().naive_utc())
        .bind(expires_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Resolve an unexpired session token to the user that owns it
    pub async fn find_user(&self, token: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.created_at
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = ? AND s.expires_at > ?
            "#,
        )
        .bind(token)
        .bind(Utc::now().naive_utc())
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_user_row))
    }

    /// Delete a session. Returns true if it existed.
    pub async fn delete_session(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every session past its expiry. Returns how many were removed.
    pub async fn delete_expired(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now().naive_utc())
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }

    /// Number of stored sessions for a user
    #[cfg(test)]
    pub async fn count_sessions(&self, user_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.db.pool())
            .await?;
        Ok(row.get("n"))
    }
}
