//! # Expense Tracker Backend
//!
//! Server side of the personal expense tracker.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (REST handlers, session extractor, mappers)
//!     ↓
//! Domain Layer (services, parser, forecaster)
//!     ↓
//! Storage Layer (SQLite repositories)
//! ```
//!
//! [`initialize_backend`] wires the services together and
//! [`create_router`] exposes them over HTTP.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::{AnalyticsService, AuthService, BudgetService, ExpenseService, GoalService, ReferenceData};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub expense_service: ExpenseService,
    pub analytics_service: AnalyticsService,
    pub budget_service: BudgetService,
    pub goal_service: GoalService,
    pub reference_data: Arc<ReferenceData>,
}

impl AppState {
    pub fn new(db: DbConnection, reference_data: ReferenceData) -> Self {
        let reference_data = Arc::new(reference_data);
        Self {
            auth_service: AuthService::new(db.clone()),
            expense_service: ExpenseService::new(db.clone(), reference_data.clone()),
            analytics_service: AnalyticsService::new(db.clone()),
            budget_service: BudgetService::new(db.clone()),
            goal_service: GoalService::new(db),
            reference_data,
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;

    info!("Setting up domain model");
    let reference_data = config.load_reference_data()?;

    Ok(AppState::new(db_conn, reference_data))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: &str) -> Result<Router> {
    // Session cookies only cross origins with credentials allowed
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let api_routes = Router::new()
        .route("/reference_data", get(io::reference_data))
        .route("/recent_expenses", get(io::recent_expenses))
        .route("/expenses_timeline", get(io::expenses_timeline))
        .route("/spending_by_category", get(io::spending_by_category))
        .route("/spending_over_time", get(io::spending_over_time))
        .route("/emotion_spending", get(io::emotion_spending))
        .route("/budget_status", get(io::budget_status))
        .route("/goals", get(io::list_goals));

    let router = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/register", post(io::register))
        .route("/login", post(io::login))
        .route("/logout", get(io::logout))
        .route("/delete_account", post(io::delete_account))
        .route("/add_expense_submit", post(io::add_expense_submit))
        .route("/log_expense_json", post(io::log_expense_json))
        .route("/set_budget", post(io::set_budget))
        .route("/set_goal", post(io::set_goal))
        .route("/contribute_to_goal/:goal_id", post(io::contribute_to_goal))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    Ok(router)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::domain::commands::auth::{LoginCommand, RegisterCommand};
    use crate::io::AuthenticatedUser;
    use axum::response::Response;

    /// App state over a fresh in-memory database with the default lists
    pub async fn test_state() -> AppState {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AppState::new(db, ReferenceData::default())
    }

    /// Register `username` and open a session for it
    pub async fn login_test_user(state: &AppState, username: &str) -> AuthenticatedUser {
        let email = format!("{}@example.com", username);
        state
            .auth_service
            .register(RegisterCommand {
                username: username.to_string(),
                email: email.clone(),
                password: "password123".to_string(),
                confirm_password: "password123".to_string(),
            })
            .await
            .expect("Failed to register test user");
        let login = state
            .auth_service
            .login(LoginCommand {
                email,
                password: "password123".to_string(),
                remember: false,
            })
            .await
            .expect("Failed to log in test user");

        AuthenticatedUser {
            user_id: login.user.id,
            username: login.user.username,
            session_token: login.session_token,
        }
    }

    pub async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    }
}
