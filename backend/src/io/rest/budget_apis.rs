//! # REST API for Budgets

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Local;
use tracing::{error, info};

use crate::domain::DomainError;
use crate::io::rest::mappers::budget_mapper::BudgetMapper;
use crate::io::rest::payload::JsonPayload;
use crate::io::rest::session::AuthenticatedUser;
use crate::AppState;
use shared::{BudgetStatusQuery, SetBudgetRequest};

/// Create or update a monthly budget
pub async fn set_budget(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    JsonPayload(request): JsonPayload<SetBudgetRequest>,
) -> impl IntoResponse {
    info!("POST /set_budget - user {}, request: {:?}", user.user_id, request);

    let command = BudgetMapper::to_set_budget_command(request);
    match state.budget_service.set_budget(user.user_id, command).await {
        Ok(write) => (StatusCode::CREATED, Json(BudgetMapper::to_budget_response(write))).into_response(),
        Err(e) => {
            if matches!(e, DomainError::Storage(_)) {
                error!("Failed to set budget: {}", e);
            }
            e.into_response()
        }
    }
}

/// Spend vs. budget for a month, defaulting to the current one
pub async fn budget_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<BudgetStatusQuery>,
) -> impl IntoResponse {
    info!("GET /api/budget_status - user {}, query: {:?}", user.user_id, query);

    let today = Local::now().date_naive();
    let query = BudgetMapper::to_status_query(query);

    match state.budget_service.budget_status(user.user_id, query, today).await {
        Ok(statuses) => (StatusCode::OK, Json(BudgetMapper::to_status_dto_list(statuses))).into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, login_test_user, test_state};
    use chrono::Datelike;
    use shared::NumericInput;

    fn request(category: &str, amount: f64, month: u32, year: i32) -> SetBudgetRequest {
        SetBudgetRequest {
            category: Some(category.to_string()),
            amount: Some(NumericInput::Number(amount)),
            month: Some(NumericInput::Number(f64::from(month))),
            year: Some(NumericInput::Number(f64::from(year))),
        }
    }

    #[tokio::test]
    async fn test_set_budget_created_then_updated() {
        let state = test_state().await;
        let user = login_test_user(&state, "xia").await;

        let first = set_budget(State(state.clone()), user.clone(), JsonPayload(request("Dining", 200.0, 3, 2024)))
            .await
            .into_response();
        assert_eq!(first.status(), StatusCode::CREATED);
        assert_eq!(body_json(first).await["message"], "Budget set!");

        let second = set_budget(State(state.clone()), user.clone(), JsonPayload(request("Dining", 300.0, 3, 2024)))
            .await
            .into_response();
        assert_eq!(second.status(), StatusCode::CREATED);
        let body = body_json(second).await;
        assert_eq!(body["message"], "Budget updated!");
        assert_eq!(body["budget"]["amount"], 300.0);

        let statuses = body_json(
            budget_status(
                State(state),
                user,
                Query(BudgetStatusQuery { month: Some(3), year: Some(2024) }),
            )
            .await
            .into_response(),
        )
        .await;
        assert_eq!(statuses.as_array().map(Vec::len), Some(1));
        assert_eq!(statuses[0]["category"], "Dining");
        assert_eq!(statuses[0]["remaining"], 300.0);
        assert_eq!(statuses[0]["on_track"], true);
    }

    #[tokio::test]
    async fn test_set_budget_invalid_month() {
        let state = test_state().await;
        let user = login_test_user(&state, "yan").await;

        let response = set_budget(State(state), user, JsonPayload(request("Dining", 200.0, 13, 2024)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid budget data");
    }

    #[tokio::test]
    async fn test_budget_status_defaults_to_current_month() {
        let state = test_state().await;
        let user = login_test_user(&state, "zed").await;
        let today = Local::now().date_naive();

        set_budget(
            State(state.clone()),
            user.clone(),
            JsonPayload(request("Overall", 500.0, today.month(), today.year())),
        )
        .await;

        let body = body_json(
            budget_status(State(state), user, Query(BudgetStatusQuery::default()))
                .await
                .into_response(),
        )
        .await;
        assert_eq!(body[0]["category"], "Overall");
        assert_eq!(body[0]["month"], today.month());
        assert_eq!(body[0]["spent"], 0.0);
    }
}
