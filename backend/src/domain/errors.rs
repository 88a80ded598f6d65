//! Errors raised by domain services.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A single invalid input
    #[error("{0}")]
    Validation(String),
    /// Several invalid form fields, reported together
    #[error("{message}")]
    InvalidForm { message: String, errors: Vec<String> },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
