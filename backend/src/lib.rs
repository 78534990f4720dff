//! # Onboarding Calendar Backend
//!
//! Serves month-view calendars of onboarding sessions and calendar events
//! over a JSON REST API, persisting both to CSV files.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (services, validation, clock)
//!     ↓
//! Storage Layer (CSV repositories)
//! ```
//!
//! The month grid itself is built by the `shared` crate so that clients can
//! reproduce it from the same data.

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use shared::Locale;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{CalendarService, Clock, EventService, SessionService, SystemClock};
use crate::io::rest::{calendar_apis, event_apis, session_apis};
use crate::storage::{CsvConnection, CsvEventRepository, CsvSessionRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub calendar_service: CalendarService,
    pub session_service: SessionService,
    pub event_service: EventService,
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Opening data directory {}", config.data_dir.display());
    let connection = CsvConnection::new(&config.data_dir)?;

    info!("Setting up domain services (default locale: {})", config.default_locale.code());
    Ok(build_state(connection, Arc::new(SystemClock), config.default_locale))
}

/// Wire the services over one CSV connection and clock
pub fn build_state(connection: CsvConnection, clock: Arc<dyn Clock>, default_locale: Locale) -> AppState {
    let sessions = Arc::new(CsvSessionRepository::new(connection.clone()));
    let events = Arc::new(CsvEventRepository::new(connection));

    AppState {
        calendar_service: CalendarService::new(
            sessions.clone(),
            events.clone(),
            clock.clone(),
            default_locale,
        ),
        session_service: SessionService::new(sessions, clock.clone()),
        event_service: EventService::new(events, clock),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: &str) -> Result<Router> {
    let origin = cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin `{}`", cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(health))
        .nest("/calendar", calendar_apis::router())
        .nest("/sessions", session_apis::router())
        .nest("/events", event_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(app_state))
}

async fn health() -> &'static str {
    "ok"
}
