//! Onboarding session management.
//!
//! Creating, fetching, listing and deleting the sessions that show up on the
//! calendar. Range listing uses the same inclusive overlap rule as the grid,
//! so a session listed for a window is exactly one the grid would display
//! somewhere in that window.

use shared::{CreateSessionRequest, DateRangeQuery, DateSpan, SessionSummary};
use std::sync::Arc;
use tracing::info;

use super::clock::{Clock, IdTimestamps};
use super::error::{DomainError, DomainResult};
use super::validation::{validate_color, validate_date_range, validate_title};
use crate::storage::SessionStorage;

#[derive(Clone)]
pub struct SessionService {
    storage: Arc<dyn SessionStorage>,
    clock: Arc<dyn Clock>,
    ids: Arc<IdTimestamps>,
}

impl SessionService {
    pub fn new(storage: Arc<dyn SessionStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            ids: Arc::new(IdTimestamps::default()),
        }
    }

    /// Validate and persist a new session
    pub async fn create_session(&self, request: CreateSessionRequest) -> DomainResult<SessionSummary> {
        let title = validate_title(&request.title)?;
        let type_color = validate_color(&request.type_color)?;
        validate_date_range(request.start_date, request.end_date)?;

        let session = SessionSummary {
            id: SessionSummary::generate_id(self.ids.next(self.clock.now_millis())),
            title,
            type_color,
            start_date: request.start_date,
            end_date: request.end_date,
        };

        self.storage.store_session(&session).await?;
        info!(
            "Created session {} '{}' ({} .. {})",
            session.id,
            session.title,
            session.start_date,
            session.effective_end_date()
        );
        Ok(session)
    }

    pub async fn get_session(&self, session_id: &str) -> DomainResult<SessionSummary> {
        self.storage
            .get_session(session_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Session {}", session_id)))
    }

    /// List sessions overlapping the optional window, ordered by start date
    /// then title. Open-ended windows extend to the first or last stored day.
    pub async fn list_sessions(&self, range: DateRangeQuery) -> DomainResult<Vec<SessionSummary>> {
        let mut sessions = match (range.start, range.end) {
            (Some(start), Some(end)) => {
                if end < start {
                    return Err(DomainError::Validation(format!(
                        "Range end {} is before range start {}",
                        end, start
                    )));
                }
                self.storage.list_sessions_in_range(start, end).await?
            }
            (start, end) => self
                .storage
                .list_sessions()
                .await?
                .into_iter()
                .filter(|s| start.map_or(true, |start| s.effective_end_date() >= start))
                .filter(|s| end.map_or(true, |end| s.start_date <= end))
                .collect(),
        };

        sessions.sort_by(|a, b| (a.start_date, &a.title).cmp(&(b.start_date, &b.title)));
        Ok(sessions)
    }

    pub async fn delete_session(&self, session_id: &str) -> DomainResult<()> {
        if self.storage.delete_session(session_id).await? {
            info!("Deleted session {}", session_id);
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Session {}", session_id)))
        }
    }
}
