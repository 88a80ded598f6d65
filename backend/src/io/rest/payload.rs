//! JSON request bodies that reject malformed input with `{"error": ...}`.

use axum::extract::{rejection::JsonRejection, FromRequest};
use tracing::info;

use crate::domain::DomainError;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON payload";

/// Drop-in for `axum::Json` on request bodies. Syntax errors, wrong field
/// types and a missing JSON content type all become a 400 validation error
/// instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(DomainError))]
pub struct JsonPayload<T>(pub T);

impl From<JsonRejection> for DomainError {
    fn from(rejection: JsonRejection) -> Self {
        info!("Rejected request body: {}", rejection.body_text());
        DomainError::validation(INVALID_JSON_MESSAGE)
    }
}
