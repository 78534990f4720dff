use shared::CalendarError;
use thiserror::Error;

/// Errors surfaced by the domain services
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed request arguments such as a month outside 1-12
    #[error("{0}")]
    InvalidArgument(String),
    /// Well-formed input that breaks a business rule
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("storage error: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl From<CalendarError> for DomainError {
    fn from(error: CalendarError) -> Self {
        match error {
            CalendarError::InvalidArgument(message) => DomainError::InvalidArgument(message),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
