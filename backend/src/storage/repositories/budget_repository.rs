use anyhow::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::budget::{Budget, BudgetWrite};
use crate::storage::connection::DbConnection;

/// Repository for monthly budgets
#[derive(Clone)]
pub struct BudgetRepository {
    db: DbConnection,
}

impl BudgetRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a budget, or update the amount if one already exists for
    /// (user, category, month, year).
    ///
    /// Both statements are writes, so the transaction holds the write lock
    /// from its first statement and concurrent upserts on one key queue
    /// instead of failing with a stale read snapshot.
    pub async fn upsert_budget(
        &self,
        user_id: i64,
        category: &str,
        amount: f64,
        month: u32,
        year: i32,
    ) -> Result<BudgetWrite> {
        let mut tx = self.db.pool().begin().await?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO budgets (user_id, category, amount, month, year)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (user_id, category, month, year) DO NOTHING
            RETURNING id, user_id, category, amount, month, year
            "#,
        )
        .bind(user_id)
        .bind(category)
        .bind(amount)
        .bind(month)
        .bind(year)
        .fetch_optional(&mut *tx)
        .await?;

        let write = match inserted {
            Some(row) => BudgetWrite::Created(map_budget_row(&row)),
            None => {
                let row = sqlx::query(
                    r#"
                    UPDATE budgets
                    SET amount = ?
                    WHERE user_id = ? AND category = ? AND month = ? AND year = ?
                    RETURNING id, user_id, category, amount, month, year
                    "#,
                )
                .bind(amount)
                .bind(user_id)
                .bind(category)
                .bind(month)
                .bind(year)
                .fetch_one(&mut *tx)
                .await?;
                BudgetWrite::Updated(map_budget_row(&row))
            }
        };

        tx.commit().await?;
        Ok(write)
    }

    /// All of a user's budgets for one month, in creation order
    pub async fn list_budgets_for_month(&self, user_id: i64, month: u32, year: i32) -> Result<Vec<Budget>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, category, amount, month, year
            FROM budgets
            WHERE user_id = ? AND month = ? AND year = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .bind(month)
        .bind(year)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(map_budget_row).collect())
    }
}

fn map_budget_row(row: &SqliteRow) -> Budget {
    Budget {
        id: row.get("id"),
        user_id: row.get("user_id"),
        category: row.get("category"),
        amount: row.get("amount"),
        month: row.get("month"),
        year: row.get("year"),
    }
}
