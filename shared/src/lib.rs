use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod calendar_grid;
pub mod date_only;

pub use calendar_grid::{
    build_calendar_month, format_long_date, grid_bounds, month_name, next_month, previous_month,
    CalendarError, CalendarGridBuilder,
};
pub use date_only::{DateOnly, DateOnlyParseError};

/// Anything that occupies an inclusive range of calendar days.
///
/// A missing end date means the item lasts a single day. An end date before
/// the start date yields an empty range.
pub trait DateSpan {
    fn start_date(&self) -> DateOnly;
    fn end_date(&self) -> Option<DateOnly>;

    fn effective_end_date(&self) -> DateOnly {
        self.end_date().unwrap_or_else(|| self.start_date())
    }

    /// Whether `date` falls within `[start_date, end_date]`.
    fn covers(&self, date: DateOnly) -> bool {
        self.start_date() <= date && date <= self.effective_end_date()
    }

    /// Whether the span shares at least one day with `[start, end]`.
    fn overlaps(&self, start: DateOnly, end: DateOnly) -> bool {
        self.start_date() <= end && start <= self.effective_end_date()
    }
}

/// Onboarding session as shown on the calendar.
///
/// ID in format: "session::epoch_millis"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    /// Display color of the session's onboarding type (e.g. "#3b82f6")
    pub type_color: String,
    pub start_date: DateOnly,
    /// Defaults to `start_date` when absent
    pub end_date: Option<DateOnly>,
}

/// Kind of calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Event generated for an onboarding session
    SessionLinked,
    Meeting,
    Holiday,
    Other,
}

/// Calendar event (meeting, holiday, ...) as shown on the calendar.
///
/// ID in format: "event::epoch_millis"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: String,
    pub title: String,
    pub kind: EventKind,
    pub start_date: DateOnly,
    pub end_date: Option<DateOnly>,
    pub is_all_day: bool,
    pub color: String,
}

/// A single cell of the month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: DateOnly,
    /// False for padding days borrowed from the previous or next month
    pub is_in_target_month: bool,
    pub sessions: Vec<SessionSummary>,
    pub events: Vec<EventSummary>,
}

/// A month view: whole Monday-to-Sunday weeks covering the month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    /// 1 = January ... 12 = December
    pub month: u32,
    pub month_name: String,
    pub weeks: Vec<Vec<CalendarDay>>,
}

impl CalendarMonth {
    /// All days in grid order.
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten()
    }

    pub fn day(&self, date: DateOnly) -> Option<&CalendarDay> {
        self.days().find(|day| day.date == date)
    }

    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(Vec::len).sum()
    }
}

/// Language used for month names and formatted dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl Locale {
    /// Parse a locale code such as "es", "EN" or "es-MX".
    pub fn from_code(code: &str) -> Option<Self> {
        let language = code.trim().split(['-', '_']).next().unwrap_or("");
        match language.to_ascii_lowercase().as_str() {
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Like [`Locale::from_code`], falling back to `fallback` for missing or
    /// unknown codes.
    pub fn resolve(code: Option<&str>, fallback: Locale) -> Self {
        code.and_then(Self::from_code).unwrap_or(fallback)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }
}

/// Query parameters for a calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonthRequest {
    pub year: i32,
    pub month: u32,
    pub locale: Option<String>,
}

/// Current date information from the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentDateResponse {
    pub date: DateOnly,
    pub month_name: String,
    pub formatted_date: String, // e.g., "16 de octubre de 2026"
}

/// Optional inclusive date window for listing sessions or events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeQuery {
    pub start: Option<DateOnly>,
    pub end: Option<DateOnly>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub title: String,
    pub type_color: String,
    pub start_date: DateOnly,
    pub end_date: Option<DateOnly>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub kind: EventKind,
    pub start_date: DateOnly,
    pub end_date: Option<DateOnly>,
    #[serde(default)]
    pub is_all_day: bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListResponse {
    pub events: Vec<EventSummary>,
}

/// Body returned for every non-2xx API response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl DateSpan for SessionSummary {
    fn start_date(&self) -> DateOnly {
        self.start_date
    }

    fn end_date(&self) -> Option<DateOnly> {
        self.end_date
    }
}

impl DateSpan for EventSummary {
    fn start_date(&self) -> DateOnly {
        self.start_date
    }

    fn end_date(&self) -> Option<DateOnly> {
        self.end_date
    }
}

impl SessionSummary {
    pub const ID_PREFIX: &'static str = "session";

    /// Generate a session ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("{}::{}", Self::ID_PREFIX, epoch_millis)
    }

    /// Parse a session ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, EntityIdError> {
        parse_entity_id(Self::ID_PREFIX, id)
    }
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::SessionLinked => "session_linked",
            EventKind::Meeting => "meeting",
            EventKind::Holiday => "holiday",
            EventKind::Other => "other",
        }
    }

    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value.trim() {
            "session_linked" => Some(EventKind::SessionLinked),
            "meeting" => Some(EventKind::Meeting),
            "holiday" => Some(EventKind::Holiday),
            "other" => Some(EventKind::Other),
            _ => None,
        }
    }
}

impl EventSummary {
    pub const ID_PREFIX: &'static str = "event";

    /// Generate an event ID based on timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("{}::{}", Self::ID_PREFIX, epoch_millis)
    }

    /// Parse an event ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, EntityIdError> {
        parse_entity_id(Self::ID_PREFIX, id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityIdError {
    #[error("Invalid ID format")]
    InvalidFormat,
    #[error("Invalid timestamp in ID")]
    InvalidTimestamp,
}

fn parse_entity_id(prefix: &str, id: &str) -> Result<u64, EntityIdError> {
    let parts: Vec<&str> = id.split("::").collect();
    if parts.len() != 2 || parts[0] != prefix {
        return Err(EntityIdError::InvalidFormat);
    }

    parts[1]
        .parse::<u64>()
        .map_err(|_| EntityIdError::InvalidTimestamp)
}
