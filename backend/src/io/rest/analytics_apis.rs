//! # REST API for Spending Charts
//!
//! Each endpoint answers with a `{labels, data}` series for the logged-in user.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::io::rest::mappers::chart_mapper::ChartMapper;
use crate::io::rest::session::AuthenticatedUser;
use crate::AppState;

/// Total spent per category
pub async fn spending_by_category(State(state): State<AppState>, user: AuthenticatedUser) -> impl IntoResponse {
    info!("GET /api/spending_by_category - user {}", user.user_id);

    match state.analytics_service.spending_by_category(user.user_id).await {
        Ok(totals) => (StatusCode::OK, Json(ChartMapper::from_labeled(totals))).into_response(),
        Err(e) => {
            error!("Failed to compute spending by category: {}", e);
            e.into_response()
        }
    }
}

/// Total spent per month, with empty months filled in
pub async fn spending_over_time(State(state): State<AppState>, user: AuthenticatedUser) -> impl IntoResponse {
    info!("GET /api/spending_over_time - user {}", user.user_id);

    match state.analytics_service.spending_over_time(user.user_id).await {
        Ok(months) => (StatusCode::OK, Json(ChartMapper::from_monthly(months))).into_response(),
        Err(e) => {
            error!("Failed to compute spending over time: {}", e);
            e.into_response()
        }
    }
}

/// Total spent per emotion tag
pub async fn emotion_spending(State(state): State<AppState>, user: AuthenticatedUser) -> impl IntoResponse {
    info!("GET /api/emotion_spending - user {}", user.user_id);

    match state.analytics_service.spending_by_emotion(user.user_id).await {
        Ok(totals) => (StatusCode::OK, Json(ChartMapper::from_labeled(totals))).into_response(),
        Err(e) => {
            error!("Failed to compute emotion spending: {}", e);
            e.into_response()
        }
    }
}
