use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

use crate::domain::models::expense::{Expense, LabeledTotal, MonthlyTotal, NewExpense};
use crate::storage::connection::DbConnection;

/// Repository for expense operations
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Store an expense in the database
    pub async fn store_expense(&self, expense: &NewExpense) -> Result<Expense> {
        let mut conn = self.db.pool().acquire().await?;
        Self::insert_with(&mut conn, expense).await
    }

    /// Insert on an existing connection so callers can include the write
    /// in their own transaction.
    pub(crate) async fn insert_with(conn: &mut SqliteConnection, expense: &NewExpense) -> Result<Expense> {
        let row = sqlx::query(
            r#"
            INSERT INTO expenses (user_id, amount, category, description, merchant, emotion_tag, date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, amount, category, description, merchant, emotion_tag, date, created_at
            "#,
        )
        .bind(expense.user_id)
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(&expense.description)
        .bind(&expense.merchant)
        .bind(&expense.emotion_tag)
        .bind(expense.date)
        .bind(Utc::now().naive_utc())
        .fetch_one(&mut *conn)
        .await?;

        Ok(map_expense_row(&row))
    }

    /// List one page of a user's expenses, newest date first.
    /// Ties on date are broken by id so pages never overlap.
    pub async fn list_expenses(&self, user_id: i64, limit: i64, offset: i64) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, amount, category, description, merchant, emotion_tag, date, created_at
            FROM expenses
            WHERE user_id = ?
            ORDER BY date DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(map_expense_row).collect())
    }

    pub async fn count_expenses(&self, user_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM expenses WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(self.db.pool())
            .await?;
        Ok(row.get("n"))
    }

    /// Total spent per category
    pub async fn totals_by_category(&self, user_id: i64) -> Result<Vec<LabeledTotal>> {
        let rows = sqlx::query(
            r#"
            SELECT category AS label, SUM(amount) AS total
            FROM expenses
            WHERE user_id = ?
            GROUP BY category
            ORDER BY category
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(map_labeled_total).collect())
    }

    /// Total spent per emotion tag. Untagged expenses are left out.
    pub async fn totals_by_emotion(&self, user_id: i64) -> Result<Vec<LabeledTotal>> {
        let rows = sqlx::query(
            r#"
            SELECT emotion_tag AS label, SUM(amount) AS total
            FROM expenses
            WHERE user_id = ? AND emotion_tag IS NOT NULL
            GROUP BY emotion_tag
            ORDER BY emotion_tag
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(map_labeled_total).collect())
    }

    /// Total spent per calendar month, only for months that have expenses.
    /// Ordered oldest first.
    pub async fn totals_by_month(&self, user_id: i64) -> Result<Vec<MonthlyTotal>> {
        let rows = sqlx::query(
            r#"
            SELECT strftime('%Y-%m', date) AS month_key, SUM(amount) AS total
            FROM expenses
            WHERE user_id = ?
            GROUP BY month_key
            ORDER BY month_key
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .filter_map(|row| {
                let key: Option<String> = row.get("month_key");
                let total: f64 = row.get("total");
                key.and_then(|k| MonthlyTotal::from_key(&k, total))
            })
            .collect())
    }

    /// Total spent in `[start, end)`, optionally restricted to one category
    pub async fn total_between(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
        category: Option<&str>,
    ) -> Result<f64> {
        let query = if let Some(category) = category {
            sqlx::query(
                r#"
                SELECT SUM(amount) AS total
                FROM expenses
                WHERE user_id = ? AND date >= ? AND date < ? AND category = ?
                "#,
            )
            .bind(user_id)
            .bind(start)
            .bind(end)
            .bind(category)
        } else {
            sqlx::query(
                r#"
                SELECT SUM(amount) AS total
                FROM expenses
                WHERE user_id = ? AND date >= ? AND date < ?
                "#,
            )
            .bind(user_id)
            .bind(start)
            .bind(end)
        };

        let row = query.fetch_one(self.db.pool()).await?;
        let total: Option<f64> = row.get("total");
        Ok(total.unwrap_or(0.0))
    }
}

pub(crate) fn map_expense_row(row: &SqliteRow) -> Expense {
    Expense {
        id: row.get("id"),
        user_id: row.get("user_id"),
        amount: row.get("amount"),
        category: row.get("category"),
        description: row.get("description"),
        merchant: row.get("merchant"),
        emotion_tag: row.get("emotion_tag"),
        date: row.get("date"),
        created_at: row.get("created_at"),
    }
}

fn map_labeled_total(row: &SqliteRow) -> LabeledTotal {
    LabeledTotal {
        label: row.get("label"),
        total: row.get("total"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::user::NewUser;
    use crate::storage::repositories::UserRepository;

    async fn setup_test() -> (ExpenseRepository, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let user = UserRepository::new(db.clone())
            .create_user(&NewUser {
                username: "dave".to_string(),
                email: "dave@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .expect("Failed to create user");
        (ExpenseRepository::new(db), user.id)
    }

    fn expense(user_id: i64, amount: f64, category: &str, date: &str, emotion: Option<&str>) -> NewExpense {
        NewExpense {
            user_id,
            amount,
            category: category.to_string(),
            description: Some(format!("{} expense", category)),
            merchant: None,
            emotion_tag: emotion.map(str::to_string),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_store_and_list_expenses_newest_first() {
        let (repo, user_id) = setup_test().await;

        let first = repo.store_expense(&expense(user_id, 10.0, "Dining", "2024-03-01", None)).await.unwrap();
        let second = repo.store_expense(&expense(user_id, 20.0, "Travel", "2024-03-05", None)).await.unwrap();
        // Same date as `second`, inserted later, so it sorts ahead of it
        let third = repo.store_expense(&expense(user_id, 30.0, "Health", "2024-03-05", None)).await.unwrap();

        let listed = repo.list_expenses(user_id, 10, 0).await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);

        let second_page = repo.list_expenses(user_id, 2, 2).await.unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].id, first.id);
        assert_eq!(repo.count_expenses(user_id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_totals_by_category_and_emotion() {
        let (repo, user_id) = setup_test().await;

        repo.store_expense(&expense(user_id, 10.0, "Dining", "2024-01-02", Some("happy"))).await.unwrap();
        repo.store_expense(&expense(user_id, 15.5, "Dining", "2024-01-03", None)).await.unwrap();
        repo.store_expense(&expense(user_id, 4.5, "Transport", "2024-01-04", Some("happy"))).await.unwrap();
        repo.store_expense(&expense(user_id, 7.0, "Transport", "2024-01-05", Some("stressed"))).await.unwrap();

        let by_category = repo.totals_by_category(user_id).await.unwrap();
        assert_eq!(
            by_category,
            vec![
                LabeledTotal { label: "Dining".to_string(), total: 25.5 },
                LabeledTotal { label: "Transport".to_string(), total: 11.5 },
            ]
        );

        let by_emotion = repo.totals_by_emotion(user_id).await.unwrap();
        assert_eq!(
            by_emotion,
            vec![
                LabeledTotal { label: "happy".to_string(), total: 14.5 },
                LabeledTotal { label: "stressed".to_string(), total: 7.0 },
            ]
        );
    }

    #[tokio::test]
    async fn test_totals_by_month_only_returns_months_with_spending() {
        let (repo, user_id) = setup_test().await;

        repo.store_expense(&expense(user_id, 100.0, "Groceries", "2024-01-10", None)).await.unwrap();
        repo.store_expense(&expense(user_id, 50.0, "Groceries", "2024-03-20", None)).await.unwrap();
        repo.store_expense(&expense(user_id, 25.0, "Dining", "2024-03-21", None)).await.unwrap();

        let months = repo.totals_by_month(user_id).await.unwrap();
        assert_eq!(
            months,
            vec![
                MonthlyTotal { year: 2024, month: 1, total: 100.0 },
                MonthlyTotal { year: 2024, month: 3, total: 75.0 },
            ]
        );
    }

    #[tokio::test]
    async fn test_total_between_with_and_without_category() {
        let (repo, user_id) = setup_test().await;

        repo.store_expense(&expense(user_id, 10.0, "Dining", "2024-05-01", None)).await.unwrap();
        repo.store_expense(&expense(user_id, 20.0, "Travel", "2024-05-31", None)).await.unwrap();
        repo.store_expense(&expense(user_id, 40.0, "Dining", "2024-06-01", None)).await.unwrap();

        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        assert_eq!(repo.total_between(user_id, start, end, None).await.unwrap(), 30.0);
        assert_eq!(repo.total_between(user_id, start, end, Some("Dining")).await.unwrap(), 10.0);
        assert_eq!(repo.total_between(user_id, start, end, Some("Health")).await.unwrap(), 0.0);
    }
}
