//! Calendar dates without time-of-day or timezone.
//!
//! Every date that crosses into the calendar grid is a [`DateOnly`]. Comparing
//! two of them only ever compares (year, month, day), so a value parsed in one
//! timezone can never drift to the neighbouring day in another.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wire and storage format for dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date, ordered by (year, month, day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateOnly(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date `{input}`: expected YYYY-MM-DD")]
pub struct DateOnlyParseError {
    pub input: String,
}

impl DateOnly {
    /// Returns `None` for impossible dates such as 2023-02-29.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn first_of_month(year: i32, month: u32) -> Option<Self> {
        Self::from_ymd(year, month, 1)
    }

    /// Last calendar day of the month, rolling the year over in December.
    pub fn last_of_month(year: i32, month: u32) -> Option<Self> {
        if month == 12 {
            return Self::from_ymd(year, 12, 31);
        }
        if !(1..12).contains(&month) {
            return None;
        }
        Self::first_of_month(year, month + 1)?
            .0
            .pred_opt()
            .map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// ISO-8601 weekday: Monday = 1 ... Sunday = 7.
    pub fn iso_weekday(&self) -> u32 {
        self.0.weekday().number_from_monday()
    }

    /// Shifts the date by a signed number of days. `None` if the result
    /// leaves the representable range.
    pub fn add_days(self, days: i64) -> Option<Self> {
        self.0.checked_add_signed(Duration::days(days)).map(Self)
    }

    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl From<NaiveDate> for DateOnly {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<DateOnly> for NaiveDate {
    fn from(date: DateOnly) -> Self {
        date.0
    }
}

impl FromStr for DateOnly {
    type Err = DateOnlyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| DateOnlyParseError {
                input: s.to_string(),
            })
    }
}

impl fmt::Display for DateOnly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> DateOnly {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let d = date("2024-07-16");
        assert_eq!((d.year(), d.month(), d.day()), (2024, 7, 16));
        assert_eq!(d.to_string(), "2024-07-16");

        assert!("2024-13-01".parse::<DateOnly>().is_err());
        assert!("2023-02-29".parse::<DateOnly>().is_err());
        assert!("2024-07-16T10:00:00Z".parse::<DateOnly>().is_err());
    }

    #[test]
    fn test_iso_weekday() {
        assert_eq!(date("2024-07-01").iso_weekday(), 1); // Monday
        assert_eq!(date("2024-02-01").iso_weekday(), 4); // Thursday
        assert_eq!(date("2024-08-04").iso_weekday(), 7); // Sunday
    }

    #[test]
    fn test_last_of_month() {
        assert_eq!(DateOnly::last_of_month(2024, 2), Some(date("2024-02-29")));
        assert_eq!(DateOnly::last_of_month(2023, 2), Some(date("2023-02-28")));
        assert_eq!(DateOnly::last_of_month(2024, 4), Some(date("2024-04-30")));
        assert_eq!(DateOnly::last_of_month(2024, 12), Some(date("2024-12-31")));
        assert_eq!(DateOnly::last_of_month(2024, 0), None);
        assert_eq!(DateOnly::last_of_month(2024, 13), None);
    }

    #[test]
    fn test_add_days_crosses_months_and_years() {
        assert_eq!(date("2024-07-31").add_days(1), Some(date("2024-08-01")));
        assert_eq!(date("2024-01-01").add_days(-1), Some(date("2023-12-31")));
        assert_eq!(date("2024-02-28").add_days(1), Some(date("2024-02-29")));
    }

    #[test]
    fn test_ordering_is_calendar_order() {
        assert!(date("2024-07-30") < date("2024-08-02"));
        assert!(date("2023-12-31") < date("2024-01-01"));
        assert_eq!(date("2024-07-16"), date(" 2024-07-16 "));
    }

    #[test]
    fn test_serde_uses_plain_date_string() {
        let json = serde_json::to_string(&date("2024-07-16")).unwrap();
        assert_eq!(json, "\"2024-07-16\"");

        let parsed: DateOnly = serde_json::from_str("\"2024-02-29\"").unwrap();
        assert_eq!(parsed, date("2024-02-29"));
    }
}
