//! # REST API for Accounts
//!
//! Registration, login, logout and account deletion. These are form-style
//! routes and answer with a flash envelope.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    Form,
};
use tracing::{error, info};

use crate::domain::commands::auth::{LoginCommand, RegisterCommand};
use crate::io::rest::error::flash_error_response;
use crate::io::rest::session::{clear_session_cookie, session_cookie, session_token, AuthenticatedUser};
use crate::AppState;
use shared::{FlashLevel, FlashMessage, LoginRequest, RegisterRequest};

/// Create an account
pub async fn register(
    State(state): State<AppState>,
    Form(request): Form<RegisterRequest>,
) -> impl IntoResponse {
    info!("POST /register - username: {}", request.username);

    let command = RegisterCommand {
        username: request.username,
        email: request.email,
        password: request.password,
        confirm_password: request.confirm_password,
    };

    match state.auth_service.register(command).await {
        Ok(_) => {
            let flash = FlashMessage::new(FlashLevel::Success, "Registration successful! Please log in.")
                .redirect_to("/login");
            (StatusCode::CREATED, Json(flash)).into_response()
        }
        Err(e) => {
            info!("Registration rejected: {}", e);
            flash_error_response(e, "/register")
        }
    }
}

/// Log in and receive a session cookie
pub async fn login(
    State(state): State<AppState>,
    Form(request): Form<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /login");

    let command = LoginCommand {
        remember: request.wants_remember(),
        email: request.email,
        password: request.password,
    };

    match state.auth_service.login(command).await {
        Ok(result) => {
            let flash = FlashMessage::new(
                FlashLevel::Success,
                format!("Welcome back, {}!", result.user.username),
            )
            .redirect_to("/");
            let cookie = session_cookie(&result.session_token, result.remember);
            (StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(flash)).into_response()
        }
        Err(e) => flash_error_response(e, "/login"),
    }
}

/// End the current session, if any, and clear the cookie
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    info!("GET /logout");

    if let Some(token) = session_token(&headers) {
        if let Err(e) = state.auth_service.logout(&token).await {
            error!("Failed to delete session: {}", e);
            return flash_error_response(e, "/");
        }
    }

    let flash = FlashMessage::new(FlashLevel::Info, "You have been logged out.").redirect_to("/login");
    (StatusCode::OK, [(header::SET_COOKIE, clear_session_cookie())], Json(flash)).into_response()
}

/// Delete the logged-in user's account and everything it owns
pub async fn delete_account(State(state): State<AppState>, user: AuthenticatedUser) -> impl IntoResponse {
    info!("POST /delete_account - user {}", user.user_id);

    match state.auth_service.delete_account(user.user_id).await {
        Ok(()) => {
            let flash = FlashMessage::new(FlashLevel::Info, "Your account has been deleted.").redirect_to("/register");
            (StatusCode::OK, [(header::SET_COOKIE, clear_session_cookie())], Json(flash)).into_response()
        }
        Err(e) => {
            error!("Failed to delete account {}: {}", user.user_id, e);
            flash_error_response(e, "/")
        }
    }
}
