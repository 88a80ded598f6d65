//! Monthly budgets and their status against actual spending.

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::domain::budget_forecaster;
use crate::domain::commands::budgets::{BudgetStatusQuery, SetBudgetCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::budget::{BudgetStatus, BudgetWrite};
use crate::storage::{BudgetRepository, DbConnection, ExpenseRepository};

pub const INVALID_BUDGET_MESSAGE: &str = "Invalid budget data";

#[derive(Clone)]
pub struct BudgetService {
    budget_repository: BudgetRepository,
    expense_repository: ExpenseRepository,
}

impl BudgetService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            budget_repository: BudgetRepository::new(db.clone()),
            expense_repository: ExpenseRepository::new(db),
        }
    }

    /// Create or update the budget for (category, month, year)
    pub async fn set_budget(&self, user_id: i64, command: SetBudgetCommand) -> DomainResult<BudgetWrite> {
        let invalid = || DomainError::validation(INVALID_BUDGET_MESSAGE);

        let category = command
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(invalid)?;
        let amount = command.amount.as_ref().and_then(|a| a.as_f64()).ok_or_else(invalid)?;
        let month = command.month.as_ref().and_then(|m| m.as_i64()).ok_or_else(invalid)?;
        let year = command.year.as_ref().and_then(|y| y.as_i64()).ok_or_else(invalid)?;

        if amount < 0.0 || !(1..=12).contains(&month) || year < 2000 {
            return Err(invalid());
        }
        let month = u32::try_from(month).map_err(|_| invalid())?;
        let year = i32::try_from(year).map_err(|_| invalid())?;

        let write = self
            .budget_repository
            .upsert_budget(user_id, category, amount, month, year)
            .await?;
        info!(
            "User {} {} budget {} for {}/{}",
            user_id,
            if matches!(write, BudgetWrite::Created(_)) { "created" } else { "updated" },
            category,
            month,
            year
        );
        Ok(write)
    }

    /// Spend vs. budget for every budget the user has in the requested month
    pub async fn budget_status(
        &self,
        user_id: i64,
        query: BudgetStatusQuery,
        today: NaiveDate,
    ) -> DomainResult<Vec<BudgetStatus>> {
        let month = query.month.unwrap_or_else(|| today.month());
        let year = query.year.unwrap_or_else(|| today.year());

        let (start, end) = month_bounds(year, month)
            .ok_or_else(|| DomainError::validation("Invalid month or year"))?;

        let budgets = self
            .budget_repository
            .list_budgets_for_month(user_id, month, year)
            .await?;

        let mut statuses = Vec::with_capacity(budgets.len());
        for budget in budgets {
            let category = (!budget.is_overall()).then_some(budget.category.as_str());
            let spent = self
                .expense_repository
                .total_between(user_id, start, end, category)
                .await?;

            let forecast = budget_forecaster::forecast(budget.amount, spent, month, year, today);
            statuses.push(BudgetStatus {
                budget,
                spent,
                forecasted_spending: forecast.forecasted_spending,
                on_track: forecast.on_track,
            });
        }
        Ok(statuses)
    }
}

/// First day of the month and first day of the following month
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::expense::NewExpense;
    use crate::domain::models::user::NewUser;
    use crate::storage::UserRepository;
    use shared::NumericInput;

    async fn setup_test() -> (BudgetService, ExpenseRepository, i64) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let user = UserRepository::new(db.clone())
            .create_user(&NewUser {
                username: "kim".to_string(),
                email: "kim@example.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        (BudgetService::new(db.clone()), ExpenseRepository::new(db), user.id)
    }

    fn command(category: &str, amount: f64, month: i64, year: i64) -> SetBudgetCommand {
        SetBudgetCommand {
            category: Some(category.to_string()),
            amount: Some(NumericInput::Number(amount)),
            month: Some(NumericInput::Number(month as f64)),
            year: Some(NumericInput::Text(year.to_string())),
        }
    }

    async fn spend(expenses: &ExpenseRepository, user_id: i64, amount: f64, category: &str, date: NaiveDate) {
        expenses
            .store_expense(&NewExpense {
                user_id,
                amount,
                category: category.to_string(),
                description: None,
                merchant: None,
                emotion_tag: None,
                date,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_set_budget_twice_updates() {
        let (service, _, user_id) = setup_test().await;

        let first = service.set_budget(user_id, command("Dining", 200.0, 6, 2024)).await.unwrap();
        let second = service.set_budget(user_id, command("Dining", 250.0, 6, 2024)).await.unwrap();

        assert!(matches!(first, BudgetWrite::Created(_)));
        assert!(matches!(second, BudgetWrite::Updated(_)));
        assert_eq!(second.budget().amount, 250.0);
    }

    #[tokio::test]
    async fn test_set_budget_rejects_invalid_data() {
        let (service, _, user_id) = setup_test().await;

        let cases = vec![
            command("Dining", -1.0, 6, 2024),
            command("Dining", 10.0, 13, 2024),
            command("Dining", 10.0, 0, 2024),
            command("Dining", 10.0, 6, 1999),
            command("  ", 10.0, 6, 2024),
            SetBudgetCommand::default(),
        ];
        for case in cases {
            let result = service.set_budget(user_id, case).await;
            assert!(matches!(result, Err(DomainError::Validation(ref m)) if m == INVALID_BUDGET_MESSAGE));
        }
    }

    #[tokio::test]
    async fn test_budget_status_for_current_month() {
        let (service, expenses, user_id) = setup_test().await;
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        service.set_budget(user_id, command("Dining", 250.0, 6, 2024)).await.unwrap();
        service.set_budget(user_id, command("Overall", 1000.0, 6, 2024)).await.unwrap();
        spend(&expenses, user_id, 100.0, "Dining", NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()).await;
        spend(&expenses, user_id, 50.0, "Transport", NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()).await;
        spend(&expenses, user_id, 500.0, "Dining", NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()).await;

        let statuses = service
            .budget_status(user_id, BudgetStatusQuery::default(), today)
            .await
            .unwrap();
        assert_eq!(statuses.len(), 2);

        let dining = &statuses[0];
        assert_eq!(dining.spent, 100.0);
        assert_eq!(dining.remaining(), 150.0);
        assert!((dining.forecasted_spending - 300.0).abs() < 1e-9);
        assert!(!dining.on_track);

        let overall = &statuses[1];
        assert_eq!(overall.spent, 150.0);
        assert!((overall.forecasted_spending - 450.0).abs() < 1e-9);
        assert!(overall.on_track);
    }

    #[tokio::test]
    async fn test_budget_status_for_past_month() {
        let (service, expenses, user_id) = setup_test().await;
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

        service.set_budget(user_id, command("Dining", 400.0, 5, 2024)).await.unwrap();
        spend(&expenses, user_id, 500.0, "Dining", NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()).await;

        let statuses = service
            .budget_status(user_id, BudgetStatusQuery { month: Some(5), year: Some(2024) }, today)
            .await
            .unwrap();

        assert_eq!(statuses[0].forecasted_spending, 500.0);
        assert!(!statuses[0].on_track);

        let invalid = service
            .budget_status(user_id, BudgetStatusQuery { month: Some(13), year: Some(2024) }, today)
            .await;
        assert!(invalid.is_err());
    }
}
