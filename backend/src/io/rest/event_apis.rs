//! # REST API for Calendar Events

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
use shared::{CreateEventRequest, DateRangeQuery, EventListResponse};
use tracing::info;

use super::ApiError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id", get(get_event).delete(delete_event))
}

async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(range) = query?;
    info!("GET /api/events - query: {:?}", range);

    let events = state.event_service.list_events(range).await?;
    Ok((StatusCode::OK, Json(EventListResponse { events })).into_response())
}

async fn create_event(
    State(state): State<AppState>,
    request: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = request?;
    info!("POST /api/events - request: {:?}", request);

    let event = state.event_service.create_event(request).await?;
    Ok((StatusCode::CREATED, Json(event)).into_response())
}

async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    info!("GET /api/events/{}", id);

    let event = state.event_service.get_event(&id).await?;
    Ok((StatusCode::OK, Json(event)).into_response())
}

async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    info!("DELETE /api/events/{}", id);

    state.event_service.delete_event(&id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
