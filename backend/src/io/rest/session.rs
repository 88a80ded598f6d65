//! Session cookie handling and the authenticated-user extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use tracing::debug;

use crate::domain::auth_service::REMEMBER_SESSION_DAYS;
use crate::AppState;
use shared::ErrorResponse;

pub const SESSION_COOKIE: &str = "session";
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access this page.";

/// Lifetime of a "remember me" cookie, matching the server-side session
const REMEMBER_MAX_AGE_SECS: i64 = REMEMBER_SESSION_DAYS * 24 * 60 * 60;

/// The user behind the request's session cookie.
///
/// Taking this as a handler argument is what makes a route require login:
/// requests without a live session are rejected with 401 before the
/// handler runs.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
    pub session_token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or_else(login_required)?;

        match state.auth_service.resolve_session(&token).await {
            Ok(Some(user)) => Ok(AuthenticatedUser {
                user_id: user.id,
                username: user.username,
                session_token: token,
            }),
            Ok(None) => {
                debug!("Rejected unknown session token");
                Err(login_required())
            }
            Err(e) => Err(e.into_response()),
        }
    }
}

/// Read the session token from the `Cookie` header(s)
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value for a new session. Without `remember` the cookie
/// lasts until the browser closes.
pub fn session_cookie(token: &str, remember: bool) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token);
    if remember {
        cookie.push_str(&format!("; Max-Age={}", REMEMBER_MAX_AGE_SECS));
    }
    cookie
}

pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

fn login_required() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            error: LOGIN_REQUIRED_MESSAGE.to_string(),
        }),
    )
        .into_response()
}
