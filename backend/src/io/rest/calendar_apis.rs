use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::{CalendarMonthRequest, Locale};
use tracing::info;

use super::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

/// Create a router for calendar related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/month", get(get_calendar_month))
        .route("/current-date", get(get_current_date))
        .route("/:year/:month", get(get_calendar_month_by_path))
}

fn resolve_locale(state: &AppState, code: Option<&str>) -> Locale {
    Locale::resolve(code, state.calendar_service.default_locale())
}

/// Get the month grid with its sessions and events
async fn get_calendar_month(
    State(state): State<AppState>,
    query: Result<Query<CalendarMonthRequest>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    info!("GET /api/calendar/month - query: {:?}", query);

    let locale = resolve_locale(&state, query.locale.as_deref());
    let calendar = state
        .calendar_service
        .get_calendar_month(query.year, query.month, Some(locale))
        .await?;

    Ok((StatusCode::OK, Json(calendar)).into_response())
}

/// Same as `/month`, addressed as `/api/calendar/{year}/{month}`
async fn get_calendar_month_by_path(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
    query: Result<Query<LocaleQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Path((year, month)) = path?;
    let Query(query) = query?;
    info!("GET /api/calendar/{}/{}", year, month);

    let locale = resolve_locale(&state, query.locale.as_deref());
    let calendar = state
        .calendar_service
        .get_calendar_month(year, month, Some(locale))
        .await?;

    Ok((StatusCode::OK, Json(calendar)).into_response())
}

/// Get today's date as seen by the server
async fn get_current_date(
    State(state): State<AppState>,
    query: Result<Query<LocaleQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    info!("GET /api/calendar/current-date");

    let locale = resolve_locale(&state, query.locale.as_deref());
    let response = state.calendar_service.get_current_date(Some(locale));
    Ok((StatusCode::OK, Json(response)).into_response())
}
