//! # REST API Interface Layer
//!
//! HTTP endpoints for the onboarding calendar, nested under `/api`:
//!
//! - `/api/calendar`: month grids and the current date
//! - `/api/sessions`: onboarding session CRUD
//! - `/api/events`: calendar event CRUD
//! - `/api/health`: liveness probe
//!
//! Every non-2xx response carries an [`ErrorResponse`] body.

pub mod calendar_apis;
pub mod event_apis;
pub mod session_apis;
#[cfg(test)]
pub(crate) mod test_support;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::DomainError;

/// Error returned by handlers, rendered as `{ "error": "..." }`
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidArgument(_) | DomainError::Validation(_) => {
                warn!("Rejected request: {}", err);
                Self::bad_request(err.to_string())
            }
            DomainError::NotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            DomainError::Storage(_) => {
                error!("Request failed: {}", err);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal storage error".to_string(),
                }
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}
