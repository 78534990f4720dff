//! Router-level test helpers: an isolated app with a frozen clock plus thin
//! wrappers around `oneshot` requests.

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use serde::de::DeserializeOwned;
use shared::Locale;
use std::sync::Arc;
use tower::ServiceExt;

use crate::domain::FixedClock;
use crate::storage::csv::test_utils::{sample_event, sample_session, TestEnvironment};
use crate::storage::{CsvEventRepository, CsvSessionRepository, EventStorage, SessionStorage};
use crate::{build_state, create_router, AppState};

type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

pub const TEST_CORS_ORIGIN: &str = "http://localhost:8080";

/// App backed by a temp data directory, with "today" frozen at 2024-07-16
pub struct TestApp {
    env: TestEnvironment,
    state: AppState,
}

impl TestApp {
    pub fn new() -> TestResult<Self> {
        let env = TestEnvironment::new()?;
        let clock = FixedClock {
            today: "2024-07-16".parse()?,
            millis: 1_720_000_000_000,
        };
        let state = build_state(env.connection.clone(), Arc::new(clock), Locale::Es);
        Ok(Self { env, state })
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone(), TEST_CORS_ORIGIN)
            .expect("test CORS origin is a valid header value")
    }

    pub async fn store_session(&self, id: &str, start: &str, end: Option<&str>) -> TestResult<()> {
        let repo = CsvSessionRepository::new(self.env.connection.clone());
        repo.store_session(&sample_session(id, start, end)).await?;
        Ok(())
    }

    pub async fn store_event(&self, id: &str, start: &str, end: Option<&str>) -> TestResult<()> {
        let repo = CsvEventRepository::new(self.env.connection.clone());
        repo.store_event(&sample_event(id, start, end)).await?;
        Ok(())
    }
}

async fn send(router: Router, method: Method, uri: &str, body: Body) -> TestResult<Response> {
    let request = Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json")
        .body(body)?;
    Ok(router.oneshot(request).await?)
}

pub async fn get(router: Router, uri: &str) -> TestResult<Response> {
    send(router, Method::GET, uri, Body::empty()).await
}

pub async fn delete(router: Router, uri: &str) -> TestResult<Response> {
    send(router, Method::DELETE, uri, Body::empty()).await
}

pub async fn post_json(router: Router, uri: &str, body: serde_json::Value) -> TestResult<Response> {
    send(router, Method::POST, uri, Body::from(serde_json::to_vec(&body)?)).await
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> TestResult<T> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
