//! Month grid construction.
//!
//! Builds the Monday-to-Sunday week grid shown for a month view and buckets
//! sessions and events into the days they cover. The server calls this to
//! answer `/api/calendar` requests and clients may call it directly to render
//! from data they already hold, so both always agree on the grid.
//!
//! The builder is a pure function of its arguments: no clock, no I/O and no
//! state kept between calls.

use thiserror::Error;

use crate::{CalendarDay, CalendarMonth, DateOnly, DateSpan, EventSummary, Locale, SessionSummary};

pub const DAYS_PER_WEEK: usize = 7;

const MONTH_NAMES_ES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

const MONTH_NAMES_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Builds [`CalendarMonth`] values for one locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarGridBuilder {
    locale: Locale,
}

impl CalendarGridBuilder {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Build the grid for `year`/`month` (1-12).
    ///
    /// Every day from the Monday on or before the 1st through the Sunday on
    /// or after the last day of the month appears exactly once, in order,
    /// split into weeks of seven. Sessions and events are attached to each
    /// day their inclusive `[start_date, end_date]` range covers, keeping the
    /// order they were passed in.
    ///
    /// # Errors
    /// `CalendarError::InvalidArgument` when `month` is outside 1-12 or the
    /// year cannot be represented.
    pub fn build(
        &self,
        year: i32,
        month: u32,
        sessions: &[SessionSummary],
        events: &[EventSummary],
    ) -> Result<CalendarMonth, CalendarError> {
        let (grid_start, grid_end) = grid_bounds(year, month)?;

        let mut weeks: Vec<Vec<CalendarDay>> = Vec::new();
        let mut week: Vec<CalendarDay> = Vec::with_capacity(DAYS_PER_WEEK);
        let mut date = grid_start;

        loop {
            week.push(CalendarDay {
                date,
                is_in_target_month: date.year() == year && date.month() == month,
                sessions: members_on(date, sessions),
                events: members_on(date, events),
            });

            if week.len() == DAYS_PER_WEEK {
                weeks.push(std::mem::replace(
                    &mut week,
                    Vec::with_capacity(DAYS_PER_WEEK),
                ));
            }

            if date == grid_end {
                break;
            }
            date = date.succ().ok_or_else(|| out_of_range(year, month))?;
        }

        // grid_start is a Monday and grid_end a Sunday
        debug_assert!(week.is_empty());

        Ok(CalendarMonth {
            year,
            month,
            month_name: month_name(month, self.locale).to_string(),
            weeks,
        })
    }
}

/// Build a month grid with the default locale.
pub fn build_calendar_month(
    year: i32,
    month: u32,
    sessions: &[SessionSummary],
    events: &[EventSummary],
) -> Result<CalendarMonth, CalendarError> {
    CalendarGridBuilder::default().build(year, month, sessions, events)
}

/// First (Monday) and last (Sunday) day shown in the grid for a month.
///
/// Callers use this window to fetch the sessions and events a month view
/// needs, padding days included.
pub fn grid_bounds(year: i32, month: u32) -> Result<(DateOnly, DateOnly), CalendarError> {
    validate_month(month)?;

    let first = DateOnly::first_of_month(year, month).ok_or_else(|| out_of_range(year, month))?;
    let last = DateOnly::last_of_month(year, month).ok_or_else(|| out_of_range(year, month))?;

    let leading = i64::from(first.iso_weekday()) - 1;
    let trailing = (7 - i64::from(last.iso_weekday())) % 7;

    let start = first
        .add_days(-leading)
        .ok_or_else(|| out_of_range(year, month))?;
    let end = last
        .add_days(trailing)
        .ok_or_else(|| out_of_range(year, month))?;

    Ok((start, end))
}

/// Localized month name. Months outside 1-12 map to an empty string.
pub fn month_name(month: u32, locale: Locale) -> &'static str {
    let table = match locale {
        Locale::Es => &MONTH_NAMES_ES,
        Locale::En => &MONTH_NAMES_EN,
    };
    month
        .checked_sub(1)
        .and_then(|index| table.get(index as usize))
        .copied()
        .unwrap_or("")
}

/// Human-readable long date, e.g. "16 de julio de 2024" or "July 16, 2024".
pub fn format_long_date(date: DateOnly, locale: Locale) -> String {
    let name = month_name(date.month(), locale);
    match locale {
        Locale::Es => format!("{} de {} de {}", date.day(), name.to_lowercase(), date.year()),
        Locale::En => format!("{} {}, {}", name, date.day(), date.year()),
    }
}

/// The month before `month`/`year`, as `(month, year)`.
///
/// `None` when the year would leave the `i32` range.
pub fn previous_month(month: u32, year: i32) -> Option<(u32, i32)> {
    if month <= 1 {
        Some((12, year.checked_sub(1)?))
    } else {
        Some((month - 1, year))
    }
}

/// The month after `month`/`year`, as `(month, year)`.
///
/// `None` when the year would leave the `i32` range.
pub fn next_month(month: u32, year: i32) -> Option<(u32, i32)> {
    if month >= 12 {
        Some((1, year.checked_add(1)?))
    } else {
        Some((month + 1, year))
    }
}

fn validate_month(month: u32) -> Result<(), CalendarError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(CalendarError::InvalidArgument(format!(
            "month must be between 1 and 12, got {month}"
        )))
    }
}

fn out_of_range(year: i32, month: u32) -> CalendarError {
    CalendarError::InvalidArgument(format!("{year}-{month:02} is outside the supported date range"))
}

fn members_on<T: DateSpan + Clone>(date: DateOnly, items: &[T]) -> Vec<T> {
    items.iter().filter(|item| item.covers(date)).cloned().collect()
}
