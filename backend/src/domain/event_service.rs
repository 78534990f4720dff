//! Calendar events (meetings, holidays, session-linked entries).

use shared::{CreateEventRequest, DateRangeQuery, DateSpan, EventSummary};
use std::sync::Arc;
use tracing::info;

use super::clock::{Clock, IdTimestamps};
use super::error::{DomainError, DomainResult};
use super::validation::{validate_color, validate_date_range, validate_title};
use crate::storage::EventStorage;

#[derive(Clone)]
pub struct EventService {
    storage: Arc<dyn EventStorage>,
    clock: Arc<dyn Clock>,
    ids: Arc<IdTimestamps>,
}

impl EventService {
    pub fn new(storage: Arc<dyn EventStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            ids: Arc::new(IdTimestamps::default()),
        }
    }

    pub async fn create_event(&self, request: CreateEventRequest) -> DomainResult<EventSummary> {
        let title = validate_title(&request.title)?;
        let color = validate_color(&request.color)?;
        validate_date_range(request.start_date, request.end_date)?;

        let event = EventSummary {
            id: EventSummary::generate_id(self.ids.next(self.clock.now_millis())),
            title,
            kind: request.kind,
            start_date: request.start_date,
            end_date: request.end_date,
            is_all_day: request.is_all_day,
            color,
        };

        self.storage.store_event(&event).await?;
        info!(
            "Created {} event {} '{}' on {}",
            event.kind.as_str(),
            event.id,
            event.title,
            event.start_date
        );
        Ok(event)
    }

    pub async fn get_event(&self, event_id: &str) -> DomainResult<EventSummary> {
        self.storage
            .get_event(event_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Event {}", event_id)))
    }

    /// Events overlapping the optional window, ordered by start date then title
    pub async fn list_events(&self, range: DateRangeQuery) -> DomainResult<Vec<EventSummary>> {
        let mut events = match (range.start, range.end) {
            (Some(start), Some(end)) => {
                if end < start {
                    return Err(DomainError::Validation(format!(
                        "Range end {} is before range start {}",
                        end, start
                    )));
                }
                self.storage.list_events_in_range(start, end).await?
            }
            (start, end) => self
                .storage
                .list_events()
                .await?
                .into_iter()
                .filter(|e| start.map_or(true, |start| e.effective_end_date() >= start))
                .filter(|e| end.map_or(true, |end| e.start_date <= end))
                .collect(),
        };

        events.sort_by(|a, b| (a.start_date, &a.title).cmp(&(b.start_date, &b.title)));
        Ok(events)
    }

    pub async fn delete_event(&self, event_id: &str) -> DomainResult<()> {
        if self.storage.delete_event(event_id).await? {
            Ok(())
        } else {
            Err(DomainError::NotFound(format!("Event {}", event_id)))
        }
    }
}
