//! # REST API for Onboarding Sessions

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use shared::{CreateSessionRequest, DateRangeQuery, SessionListResponse};
use tracing::info;

use super::ApiError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route("/:id", get(get_session).delete(delete_session))
}

/// List sessions, optionally limited to those overlapping `start`..`end`
async fn list_sessions(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(range) = query?;
    info!("GET /api/sessions - query: {:?}", range);

    let sessions = state.session_service.list_sessions(range).await?;
    Ok((StatusCode::OK, Json(SessionListResponse { sessions })).into_response())
}

async fn create_session(
    State(state): State<AppState>,
    request: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = request?;
    info!("POST /api/sessions - request: {:?}", request);

    let session = state.session_service.create_session(request).await?;
    Ok((StatusCode::CREATED, Json(session)).into_response())
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    info!("GET /api/sessions/{}", id);

    let session = state.session_service.get_session(&id).await?;
    Ok((StatusCode::OK, Json(session)).into_response())
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    info!("DELETE /api/sessions/{}", id);

    state.session_service.delete_session(&id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
