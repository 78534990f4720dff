//! Calendar domain logic for the onboarding calendar.
//!
//! Loads the sessions and events visible in a month's grid window and hands
//! them to the shared [`CalendarGridBuilder`], so the server and any client
//! rendering from the same data produce identical grids. Also answers "what
//! is today" for the month navigation.

use shared::{
    format_long_date, grid_bounds, month_name, CalendarGridBuilder, CalendarMonth,
    CurrentDateResponse, Locale,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::clock::Clock;
use super::error::DomainResult;
use crate::storage::{EventStorage, SessionStorage};

/// Calendar service that assembles month views from stored data
#[derive(Clone)]
pub struct CalendarService {
    sessions: Arc<dyn SessionStorage>,
    events: Arc<dyn EventStorage>,
    clock: Arc<dyn Clock>,
    default_locale: Locale,
}

impl CalendarService {
    pub fn new(
        sessions: Arc<dyn SessionStorage>,
        events: Arc<dyn EventStorage>,
        clock: Arc<dyn Clock>,
        default_locale: Locale,
    ) -> Self {
        Self {
            sessions,
            events,
            clock,
            default_locale,
        }
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Month grid for `year`/`month` with every session and event that
    /// touches one of its days, padding days included.
    ///
    /// Items inside each day are ordered by start date, then title.
    pub async fn get_calendar_month(
        &self,
        year: i32,
        month: u32,
        locale: Option<Locale>,
    ) -> DomainResult<CalendarMonth> {
        let locale = locale.unwrap_or(self.default_locale);
        let (grid_start, grid_end) = grid_bounds(year, month)?;

        let (mut sessions, mut events) = tokio::try_join!(
            self.sessions.list_sessions_in_range(grid_start, grid_end),
            self.events.list_events_in_range(grid_start, grid_end),
        )?;
        debug!(
            "Loaded {} sessions and {} events for grid {}..{}",
            sessions.len(),
            events.len(),
            grid_start,
            grid_end
        );

        sessions.sort_by(|a, b| (a.start_date, &a.title).cmp(&(b.start_date, &b.title)));
        events.sort_by(|a, b| (a.start_date, &a.title).cmp(&(b.start_date, &b.title)));

        let calendar = CalendarGridBuilder::new(locale).build(year, month, &sessions, &events)?;
        info!(
            "Built calendar for {}/{} ({} weeks, locale {})",
            month,
            year,
            calendar.weeks.len(),
            locale.code()
        );
        Ok(calendar)
    }

    /// Today's date with its localized month name and long form
    pub fn get_current_date(&self, locale: Option<Locale>) -> CurrentDateResponse {
        let locale = locale.unwrap_or(self.default_locale);
        let today = self.clock.today();

        CurrentDateResponse {
            date: today,
            month_name: month_name(today.month(), locale).to_string(),
            formatted_date: format_long_date(today, locale),
        }
    }
}
