//! # Storage Module
//!
//! Handles all data persistence for the expense tracker.
//!
//! Everything lives in a single SQLite database accessed through SQLx.
//! Each entity gets its own repository; repositories speak in domain models
//! and never apply business rules.
//!
//! ## Tables
//!
//! - **users**: accounts with unique username and email
//! - **expenses**: individual spending records, indexed by (user, date)
//! - **budgets**: monthly limits, unique per (user, category, month, year)
//! - **goals**: savings goals and their running totals
//! - **sessions**: opaque login tokens
//!
//! Multi-statement writes (budget upsert, goal contribution, account
//! deletion) run inside a single SQLx transaction that rolls back on drop.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{
    BudgetRepository,
    ExpenseRepository,
    GoalRepository,
    SessionRepository,
    UserRepository,
};
