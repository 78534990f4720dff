use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord};
use shared::{DateOnly, DateSpan, EventKind, EventSummary};
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info, warn};

use super::connection::{CsvConnection, EVENTS_FILE};
use super::session_repository::parse_optional_date;
use crate::storage::traits::EventStorage;

const EVENT_HEADER: [&str; 7] = [
    "id",
    "title",
    "kind",
    "start_date",
    "end_date",
    "is_all_day",
    "color",
];

/// CSV-based calendar event repository
#[derive(Clone)]
pub struct CsvEventRepository {
    connection: CsvConnection,
}

impl CsvEventRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_events(&self) -> Result<Vec<EventSummary>> {
        let file_path = self.connection.ensure_file_exists(EVENTS_FILE, &EVENT_HEADER)?;
        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut events = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping unreadable event row {}: {}", index + 2, e);
                    continue;
                }
            };
            match parse_event_record(&record) {
                Ok(event) => events.push(event),
                Err(e) => warn!("Skipping unreadable event row {}: {}", index + 2, e),
            }
        }

        Ok(events)
    }

    fn write_events(&self, events: &[EventSummary]) -> Result<()> {
        let rows: Vec<Vec<String>> = events.iter().map(event_to_row).collect();
        self.connection.write_atomically(EVENTS_FILE, &EVENT_HEADER, &rows)
    }
}

#[async_trait]
impl EventStorage for CsvEventRepository {
    async fn store_event(&self, event: &EventSummary) -> Result<()> {
        let _guard = self.connection.lock().await;

        let mut events = self.read_events()?;
        if events.iter().any(|e| e.id == event.id) {
            bail!("Event {} already exists", event.id);
        }

        events.push(event.clone());
        self.write_events(&events)?;

        info!("Stored {} event {} ({})", event.kind.as_str(), event.id, event.title);
        Ok(())
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<EventSummary>> {
        Ok(self.read_events()?.into_iter().find(|e| e.id == event_id))
    }

    async fn list_events(&self) -> Result<Vec<EventSummary>> {
        self.read_events()
    }

    async fn list_events_in_range(&self, start: DateOnly, end: DateOnly) -> Result<Vec<EventSummary>> {
        let events: Vec<EventSummary> = self
            .read_events()?
            .into_iter()
            .filter(|e| e.overlaps(start, end))
            .collect();

        debug!("Found {} events between {} and {}", events.len(), start, end);
        Ok(events)
    }

    async fn delete_event(&self, event_id: &str) -> Result<bool> {
        let _guard = self.connection.lock().await;

        let mut events = self.read_events()?;
        let before = events.len();
        events.retain(|e| e.id != event_id);

        if events.len() == before {
            return Ok(false);
        }

        self.write_events(&events)?;
        info!("Deleted event {}", event_id);
        Ok(true)
    }
}

fn parse_event_record(record: &StringRecord) -> Result<EventSummary> {
    let field = |index: usize| {
        record
            .get(index)
            .ok_or_else(|| anyhow!("missing column `{}`", EVENT_HEADER[index]))
    };

    let kind_code = field(2)?;
    let kind = EventKind::from_str_opt(kind_code)
        .ok_or_else(|| anyhow!("unknown event kind `{}`", kind_code))?;

    let is_all_day = match field(5)?.trim() {
        "true" => true,
        "false" | "" => false,
        other => bail!("invalid is_all_day value `{}`", other),
    };

    Ok(EventSummary {
        id: field(0)?.to_string(),
        title: field(1)?.to_string(),
        kind,
        start_date: field(3)?.parse()?,
        end_date: parse_optional_date(field(4)?)?,
        is_all_day,
        color: field(6)?.to_string(),
    })
}

fn event_to_row(event: &EventSummary) -> Vec<String> {
    vec![
        event.id.clone(),
        event.title.clone(),
        event.kind.as_str().to_string(),
        event.start_date.to_string(),
        event.end_date.map(|d| d.to_string()).unwrap_or_default(),
        event.is_all_day.to_string(),
        event.color.clone(),
    ]
}
