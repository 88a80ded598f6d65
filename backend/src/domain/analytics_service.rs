//! Spending summaries for the dashboard charts.

use crate::domain::errors::DomainResult;
use crate::domain::models::expense::{LabeledTotal, MonthlyTotal};
use crate::storage::{DbConnection, ExpenseRepository};

#[derive(Clone)]
pub struct AnalyticsService {
    expense_repository: ExpenseRepository,
}

impl AnalyticsService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            expense_repository: ExpenseRepository::new(db),
        }
    }

    pub async fn spending_by_category(&self, user_id: i64) -> DomainResult<Vec<LabeledTotal>> {
        Ok(self.expense_repository.totals_by_category(user_id).await?)
    }

    /// Monthly totals from the first to the last month with spending,
    /// including zero entries for the months in between
    pub async fn spending_over_time(&self, user_id: i64) -> DomainResult<Vec<MonthlyTotal>> {
        let months = self.expense_repository.totals_by_month(user_id).await?;
        Ok(fill_monthly_gaps(&months))
    }

    pub async fn spending_by_emotion(&self, user_id: i64) -> DomainResult<Vec<LabeledTotal>> {
        Ok(self.expense_repository.totals_by_emotion(user_id).await?)
    }
}

/// Walk month by month across the span of `months` (sorted oldest first)
/// and emit every month, using 0 where there was no spending.
pub fn fill_monthly_gaps(months: &[MonthlyTotal]) -> Vec<MonthlyTotal> {
    let (first, last) = match (months.first(), months.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Vec::new(),
    };

    let mut filled = Vec::new();
    let (mut year, mut month) = (first.year, first.month);
    while (year, month) <= (last.year, last.month) {
        let total = months
            .iter()
            .find(|m| m.year == year && m.month == month)
            .map(|m| m.total)
            .unwrap_or(0.0);
        filled.push(MonthlyTotal { year, month, total });

        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::expense::NewExpense;
    use crate::domain::models::user::NewUser;
    use crate::storage::UserRepository;
    use chrono::NaiveDate;

    fn total(year: i32, month: u32, total: f64) -> MonthlyTotal {
        MonthlyTotal { year, month, total }
    }

    #[test]
    fn test_fill_monthly_gaps_across_year_end() {
        let filled = fill_monthly_gaps(&[total(2023, 11, 5.0), total(2024, 2, 7.0)]);

        assert_eq!(
            filled,
            vec![
                total(2023, 11, 5.0),
                total(2023, 12, 0.0),
                total(2024, 1, 0.0),
                total(2024, 2, 7.0),
            ]
        );
        assert!(fill_monthly_gaps(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_spending_over_time_includes_empty_february() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let user = UserRepository::new(db.clone())
            .create_user(&NewUser {
                username: "judy".to_string(),
                email: "judy@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let expenses = ExpenseRepository::new(db.clone());
        for (amount, date) in [(100.0, "2024-01-15"), (40.0, "2024-03-02"), (10.0, "2024-03-28")] {
            expenses
                .store_expense(&NewExpense {
                    user_id: user.id,
                    amount,
                    category: "Groceries".to_string(),
                    description: None,
                    merchant: None,
                    emotion_tag: None,
                    date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                })
                .await
                .unwrap();
        }

        let series = AnalyticsService::new(db).spending_over_time(user.id).await.unwrap();
        let labels: Vec<String> = series.iter().map(MonthlyTotal::label).collect();

        assert_eq!(labels, vec!["Jan 2024", "Feb 2024", "Mar 2024"]);
        assert_eq!(series[1].total, 0.0);
        assert_eq!(series[2].total, 50.0);
    }
}
