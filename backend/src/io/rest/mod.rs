//! # REST API Interface Layer
//!
//! HTTP endpoints for the expense tracker, built on Axum.
//!
//! ## Conventions
//!
//! - Form-style routes (register, login, logout, manual expense form) answer
//!   with a flash envelope `{level, message, redirect}` instead of HTML
//! - JSON routes answer with the created record or `{"error": ...}`, including
//!   for bodies that are not valid JSON of the expected shape
//! - Every route except registration, login, logout, reference data and the
//!   health check requires a session, enforced by the [`AuthenticatedUser`]
//!   extractor
//! - Each handler logs one `info!` line on entry

pub mod analytics_apis;
pub mod auth_apis;
pub mod budget_apis;
pub mod error;
pub mod expense_apis;
pub mod goal_apis;
pub mod mappers;
pub mod payload;
pub mod session;

pub use analytics_apis::*;
pub use auth_apis::*;
pub use budget_apis::*;
pub use expense_apis::*;
pub use goal_apis::*;
pub use session::AuthenticatedUser;
