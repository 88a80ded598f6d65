//! # Domain Module
//!
//! Contains the business logic of the expense tracker, independent of HTTP
//! and of how data is stored.
//!
//! ## Module Organization
//!
//! - **auth_service**: registration, login, sessions and account deletion
//! - **expense_service**: manual and free-text expense logging, timeline paging
//! - **analytics_service**: per-category, per-month and per-emotion summaries
//! - **budget_service**: monthly budgets and their status
//! - **goal_service**: savings goals and contributions
//! - **expense_parser**: the free-text heuristic behind the smart log
//! - **budget_forecaster**: month-end spending projection
//! - **reference_data**: known categories, merchants and emotion tags
//!
//! ## Business Rules
//!
//! - Every operation is scoped to a single user
//! - Expense amounts are always positive
//! - Budgets are unique per (user, category, month, year); "Overall" covers
//!   all categories
//! - Goal contributions are also logged as "Savings Goal" expenses
//!
//! Services receive "today" as an argument wherever the result depends on the
//! current date.

pub mod analytics_service;
pub mod auth_service;
pub mod budget_forecaster;
pub mod budget_service;
pub mod commands;
pub mod errors;
pub mod expense_parser;
pub mod expense_service;
pub mod goal_service;
pub mod models;
pub mod password;
pub mod reference_data;

pub use analytics_service::AnalyticsService;
pub use auth_service::AuthService;
pub use budget_service::BudgetService;
pub use errors::{DomainError, DomainResult};
pub use expense_parser::{ExpenseParser, ParsedExpense};
pub use expense_service::ExpenseService;
pub use goal_service::GoalService;
pub use reference_data::ReferenceData;
