//! Savings goals.
//!
//! Contributing to a goal moves money into it and logs a matching expense,
//! so the contribution shows up in spending reports as well.

use chrono::NaiveDate;
use tracing::info;

use crate::domain::commands::goals::{ContributeCommand, SetGoalCommand};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::expense::NewExpense;
use crate::domain::models::goal::{
    Goal, GoalContribution, NewGoal, CONTRIBUTION_EMOTION, CONTRIBUTION_MERCHANT, SAVINGS_GOAL_CATEGORY,
};
use crate::storage::{DbConnection, GoalRepository};

pub const GOAL_CREATED_MESSAGE: &str = "Goal set successfully!";

#[derive(Clone)]
pub struct GoalService {
    goal_repository: GoalRepository,
}

impl GoalService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            goal_repository: GoalRepository::new(db),
        }
    }

    /// Create a new goal
    pub async fn set_goal(&self, user_id: i64, command: SetGoalCommand) -> DomainResult<Goal> {
        let name = command.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
        let (name, target_input) = match (name, command.target_amount.as_ref()) {
            (Some(name), Some(target)) => (name, target),
            _ => return Err(DomainError::validation("Goal name and target amount are required.")),
        };

        let target_amount = target_input
            .as_f64()
            .ok_or_else(|| DomainError::validation("Invalid amount: target amount must be a number."))?;
        if target_amount <= 0.0 {
            return Err(DomainError::validation("Invalid amount: Target amount must be positive."));
        }

        let current_amount = match &command.current_amount {
            Some(input) => input
                .as_f64()
                .ok_or_else(|| DomainError::validation("Invalid amount: current amount must be a number."))?,
            None => 0.0,
        };
        if current_amount < 0.0 {
            return Err(DomainError::validation("Invalid amount: Current amount cannot be negative."));
        }

        let due_date = match command.due_date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| DomainError::validation("Invalid due date format."))?,
            ),
            None => None,
        };

        let goal = self
            .goal_repository
            .store_goal(&NewGoal {
                user_id,
                name: name.to_string(),
                target_amount,
                current_amount,
                due_date,
            })
            .await?;
        info!("User {} created goal {} ({})", user_id, goal.id, goal.name);
        Ok(goal)
    }

    /// Add money to one of the user's goals and log it as a "Savings Goal"
    /// expense dated `today`. Goals owned by someone else are reported as
    /// not found.
    pub async fn contribute(
        &self,
        user_id: i64,
        command: ContributeCommand,
        today: NaiveDate,
    ) -> DomainResult<GoalContribution> {
        let input = command
            .amount
            .as_ref()
            .ok_or_else(|| DomainError::validation("Contribution amount required."))?;
        let amount = input
            .as_f64()
            .filter(|a| *a > 0.0)
            .ok_or_else(|| DomainError::validation("Invalid amount: Contribution must be positive."))?;

        let contribution = self
            .goal_repository
            .contribute(user_id, command.goal_id, amount, move |goal| NewExpense {
                user_id,
                amount,
                category: SAVINGS_GOAL_CATEGORY.to_string(),
                description: Some(format!("Contribution to goal: {}", goal.name)),
                merchant: Some(CONTRIBUTION_MERCHANT.to_string()),
                emotion_tag: Some(CONTRIBUTION_EMOTION.to_string()),
                date: today,
            })
            .await?
            .ok_or_else(|| DomainError::NotFound("Goal not found".to_string()))?;

        info!(
            "User {} contributed {:.2} to goal {}",
            user_id, amount, contribution.goal.id
        );
        Ok(contribution)
    }

    pub async fn list_goals(&self, user_id: i64) -> DomainResult<Vec<Goal>> {
        Ok(self.goal_repository.list_goals(user_id).await?)
    }
}

/// Confirmation shown after a contribution
pub fn contribution_message(amount: f64, goal: &Goal) -> String {
    format!("Contributed {:.2} to {}", amount, goal.name)
}
