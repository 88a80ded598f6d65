//! Domain models for savings goals.
use chrono::{NaiveDate, NaiveDateTime};

use super::expense::Expense;

/// Category assigned to the synthetic expense a contribution creates
pub const SAVINGS_GOAL_CATEGORY: &str = "Savings Goal";
pub const CONTRIBUTION_MERCHANT: &str = "Self/Bank";
pub const CONTRIBUTION_EMOTION: &str = "motivated";

#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

/// A goal that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub user_id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub due_date: Option<NaiveDate>,
}

/// Result of a committed contribution
#[derive(Debug, Clone, PartialEq)]
pub struct GoalContribution {
    pub goal: Goal,
    pub expense: Expense,
}
