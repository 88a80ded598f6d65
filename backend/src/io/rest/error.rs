//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::error;

use crate::domain::DomainError;
use shared::{ErrorResponse, FlashLevel, FlashMessage};

const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

impl DomainError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DomainError::Validation(_) | DomainError::InvalidForm { .. } => StatusCode::BAD_REQUEST,
            DomainError::Conflict(_) => StatusCode::CONFLICT,
            DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the client. Storage details stay in the log.
    fn public_message(&self) -> String {
        match self {
            DomainError::Storage(e) => {
                error!("Storage error: {:#}", e);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// `{"error": ...}` with the matching status
impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Flash envelope for form-style routes. Conflicts are warnings that send the
/// user back to `retry_path`; everything else is a danger alert.
pub fn flash_error_response(error: DomainError, retry_path: &str) -> Response {
    let status = error.status_code();
    let flash = match error {
        DomainError::InvalidForm { message, errors } => {
            FlashMessage::new(FlashLevel::Danger, message).with_errors(errors)
        }
        DomainError::Conflict(message) => {
            FlashMessage::new(FlashLevel::Warning, message).redirect_to(retry_path)
        }
        other => FlashMessage::new(FlashLevel::Danger, other.public_message()),
    };
    (status, Json(flash)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(DomainError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(DomainError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(DomainError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            DomainError::Storage(anyhow::anyhow!("disk full")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_conflict_flash_is_a_warning_with_redirect() {
        let response = flash_error_response(DomainError::Conflict("Username already taken.".into()), "/register");
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
