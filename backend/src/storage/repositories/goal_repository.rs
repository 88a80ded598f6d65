use anyhow::Result;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::expense::NewExpense;
use crate::domain::models::goal::{Goal, GoalContribution, NewGoal};
use crate::storage::connection::DbConnection;
use crate::storage::repositories::expense_repository::ExpenseRepository;

/// Repository for savings goals
#[derive(Clone)]
pub struct GoalRepository {
    db: DbConnection,
}

impl GoalRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn store_goal(&self, goal: &NewGoal) -> Result<Goal> {
        let row = sqlx::query(
            r#"
            INSERT INTO goals (user_id, name, target_amount, current_amount, due_date, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, name, target_amount, current_amount, due_date, created_at
            "#,
        )
        .bind(goal.user_id)
        .bind(&goal.name)
        .bind(goal.target_amount)
        .bind(goal.current_amount)
        .bind(goal.due_date)
        .bind(Utc::now().naive_utc())
        .fetch_one(self.db.pool())
        .await?;

        Ok(map_goal_row(&row))
    }

    /// Get a goal only if it belongs to the given user
    #[cfg(test)]
    pub async fn get_goal(&self, user_id: i64, goal_id: i64) -> Result<Option<Goal>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, name, target_amount, current_amount, due_date, created_at
            FROM goals
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(goal_id)
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(map_goal_row))
    }

    pub async fn list_goals(&self, user_id: i64) -> Result<Vec<Goal>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, name, target_amount, current_amount, due_date, created_at
            FROM goals
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(map_goal_row).collect())
    }

    /// Add `amount` to a goal and record the linked expense in one transaction.
    /// `build_expense` receives the goal with the contribution applied.
    /// Returns None, with nothing written, when the user owns no such goal.
    ///
    /// The UPDATE is the first statement so the transaction takes the write
    /// lock up front and concurrent contributors queue on the busy timeout.
    pub async fn contribute<F>(
        &self,
        user_id: i64,
        goal_id: i64,
        amount: f64,
        build_expense: F,
    ) -> Result<Option<GoalContribution>>
    where
        F: FnOnce(&Goal) -> NewExpense,
    {
        let mut tx = self.db.pool().begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE goals
            SET current_amount = current_amount + ?
            WHERE id = ? AND user_id = ?
            RETURNING id, user_id, name, target_amount, current_amount, due_date, created_at
            "#,
        )
        .bind(amount)
        .bind(goal_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let goal = match updated {
            Some(row) => map_goal_row(&row),
            None => return Ok(None),
        };

        let new_expense = build_expense(&goal);
        let expense = ExpenseRepository::insert_with(&mut tx, &new_expense).await?;

        tx.commit().await?;

        Ok(Some(GoalContribution { goal, expense }))
    }
}

fn map_goal_row(row: &SqliteRow) -> Goal {
    Goal {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        target_amount: row.get("target_amount"),
        current_amount: row.get("current_amount"),
        due_date: row.get("due_date"),
        created_at: row.get("created_at"),
    }
}
