//! # REST API for Savings Goals

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Local;
use tracing::{error, info};

use crate::domain::goal_service::{contribution_message, GOAL_CREATED_MESSAGE};
use crate::io::rest::mappers::goal_mapper::GoalMapper;
use crate::io::rest::payload::JsonPayload;
use crate::io::rest::session::AuthenticatedUser;
use crate::AppState;
use shared::{ContributeToGoalRequest, GoalResponse, SetGoalRequest};

/// Create a new goal
pub async fn set_goal(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    JsonPayload(request): JsonPayload<SetGoalRequest>,
) -> impl IntoResponse {
    info!("POST /set_goal - user {}, request: {:?}", user.user_id, request);

    let command = GoalMapper::to_set_goal_command(request);
    match state.goal_service.set_goal(user.user_id, command).await {
        Ok(goal) => {
            let response = GoalResponse {
                message: GOAL_CREATED_MESSAGE.to_string(),
                goal: GoalMapper::to_dto(goal),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// Add money to a goal
pub async fn contribute_to_goal(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(goal_id): Path<i64>,
    JsonPayload(request): JsonPayload<ContributeToGoalRequest>,
) -> impl IntoResponse {
    info!("POST /contribute_to_goal/{} - user {}", goal_id, user.user_id);

    let command = GoalMapper::to_contribute_command(goal_id, request);
    let today = Local::now().date_naive();

    match state.goal_service.contribute(user.user_id, command, today).await {
        Ok(contribution) => {
            let response = GoalResponse {
                message: contribution_message(contribution.expense.amount, &contribution.goal),
                goal: GoalMapper::to_dto(contribution.goal),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            info!("Contribution to goal {} rejected: {}", goal_id, e);
            e.into_response()
        }
    }
}

/// All of the user's goals
pub async fn list_goals(State(state): State<AppState>, user: AuthenticatedUser) -> impl IntoResponse {
    info!("GET /api/goals - user {}", user.user_id);

    match state.goal_service.list_goals(user.user_id).await {
        Ok(goals) => (StatusCode::OK, Json(GoalMapper::to_dto_list(goals))).into_response(),
        Err(e) => {
            error!("Failed to list goals: {}", e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, login_test_user, test_state};
    use shared::NumericInput;

    fn goal_request(name: &str, target: &str) -> SetGoalRequest {
        SetGoalRequest {
            name: Some(name.to_string()),
            target_amount: Some(NumericInput::Text(target.to_string())),
            current_amount: Some(NumericInput::Text("50".to_string())),
            due_date: None,
        }
    }

    #[tokio::test]
    async fn test_goal_lifecycle() {
        let state = test_state().await;
        let user = login_test_user(&state, "amy").await;

        let created = set_goal(State(state.clone()), user.clone(), JsonPayload(goal_request("Camera", "900")))
            .await
            .into_response();
        assert_eq!(created.status(), StatusCode::CREATED);
        let body = body_json(created).await;
        assert_eq!(body["message"], "Goal set successfully!");
        let goal_id = body["goal"]["id"].as_i64().unwrap();

        let contributed = contribute_to_goal(
            State(state.clone()),
            user.clone(),
            Path(goal_id),
            JsonPayload(ContributeToGoalRequest { amount: Some(NumericInput::Number(25.0)) }),
        )
        .await
        .into_response();
        assert_eq!(contributed.status(), StatusCode::OK);
        let body = body_json(contributed).await;
        assert_eq!(body["message"], "Contributed 25.00 to Camera");
        assert_eq!(body["goal"]["current_amount"], 75.0);

        let goals = body_json(list_goals(State(state), user).await.into_response()).await;
        assert_eq!(goals.as_array().map(Vec::len), Some(1));
        assert_eq!(goals[0]["current_amount"], 75.0);
    }

    #[tokio::test]
    async fn test_contribute_errors() {
        let state = test_state().await;
        let owner = login_test_user(&state, "ben").await;
        let other = login_test_user(&state, "cal").await;

        let body = body_json(
            set_goal(State(state.clone()), owner.clone(), JsonPayload(goal_request("Sofa", "400")))
                .await
                .into_response(),
        )
        .await;
        let goal_id = body["goal"]["id"].as_i64().unwrap();

        let foreign = contribute_to_goal(
            State(state.clone()),
            other,
            Path(goal_id),
            JsonPayload(ContributeToGoalRequest { amount: Some(NumericInput::Number(10.0)) }),
        )
        .await
        .into_response();
        assert_eq!(foreign.status(), StatusCode::NOT_FOUND);

        let negative = contribute_to_goal(
            State(state.clone()),
            owner.clone(),
            Path(goal_id),
            JsonPayload(ContributeToGoalRequest { amount: Some(NumericInput::Number(-3.0)) }),
        )
        .await
        .into_response();
        assert_eq!(negative.status(), StatusCode::BAD_REQUEST);

        let missing_name = set_goal(State(state), owner, JsonPayload(SetGoalRequest::default()))
            .await
            .into_response();
        assert_eq!(missing_name.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(missing_name).await["error"],
            "Goal name and target amount are required."
        );
    }
}
