//! # REST API for Expenses
//!
//! Manual and smart expense logging, recent expenses, the paginated
//! timeline, and the reference lists used to fill the forms.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Form,
};
use chrono::Local;
use tracing::{error, info};

use crate::io::rest::error::flash_error_response;
use crate::io::rest::mappers::expense_mapper::ExpenseMapper;
use crate::io::rest::payload::JsonPayload;
use crate::io::rest::session::AuthenticatedUser;
use crate::AppState;
use shared::{
    ExpenseFormRequest, ExpenseFormResponse, ExpenseTimelineQuery, FlashLevel, FlashMessage,
    ReferenceDataResponse, SmartLogRequest, SmartLogResponse,
};

/// Log an expense from the manual form
pub async fn add_expense_submit(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Form(request): Form<ExpenseFormRequest>,
) -> impl IntoResponse {
    info!("POST /add_expense_submit - user {}", user.user_id);

    let command = ExpenseMapper::to_add_expense_command(request);
    match state.expense_service.add_expense(user.user_id, command).await {
        Ok(expense) => {
            let response = ExpenseFormResponse {
                flash: FlashMessage::new(FlashLevel::Success, "Expense logged successfully via form!")
                    .redirect_to("/add_expense_page"),
                expense: ExpenseMapper::to_dto(expense),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => flash_error_response(e, "/add_expense_page"),
    }
}

/// Log an expense from free text
pub async fn log_expense_json(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    JsonPayload(request): JsonPayload<SmartLogRequest>,
) -> impl IntoResponse {
    info!("POST /log_expense_json - user {}, text: {:?}", user.user_id, request.text_input);

    let command = ExpenseMapper::to_smart_log_command(request);
    let today = Local::now().date_naive();

    match state.expense_service.smart_log(user.user_id, command, today).await {
        Ok(expense) => {
            let response = SmartLogResponse {
                message: "Smart expense logged successfully!".to_string(),
                expense: ExpenseMapper::to_dto(expense),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            info!("Smart log rejected: {}", e);
            e.into_response()
        }
    }
}

/// The five most recent expenses
pub async fn recent_expenses(State(state): State<AppState>, user: AuthenticatedUser) -> impl IntoResponse {
    info!("GET /api/recent_expenses - user {}", user.user_id);

    match state.expense_service.recent_expenses(user.user_id).await {
        Ok(expenses) => (StatusCode::OK, Json(ExpenseMapper::to_dto_list(expenses))).into_response(),
        Err(e) => {
            error!("Failed to list recent expenses: {}", e);
            e.into_response()
        }
    }
}

/// One page of the expense timeline
pub async fn expenses_timeline(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ExpenseTimelineQuery>,
) -> impl IntoResponse {
    info!("GET /api/expenses_timeline - user {}, query: {:?}", user.user_id, query);

    let query = ExpenseMapper::to_timeline_query(query);
    match state.expense_service.timeline(user.user_id, query).await {
        Ok(page) => (StatusCode::OK, Json(ExpenseMapper::to_timeline_response(page))).into_response(),
        Err(e) => {
            error!("Failed to load expense timeline: {}", e);
            e.into_response()
        }
    }
}

/// Categories, merchants and emotion tags the server recognises
pub async fn reference_data(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/reference_data");

    let reference = &state.reference_data;
    Json(ReferenceDataResponse {
        categories: reference.categories.clone(),
        merchants: reference.merchants.clone(),
        emotions: reference.emotions.clone(),
    })
}
