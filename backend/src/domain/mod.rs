//! # Domain Module
//!
//! Business logic for the onboarding calendar, independent of HTTP and of
//! the CSV storage format.
//!
//! ## Module Organization
//!
//! - **calendar**: Month views and the current date
//! - **session_service**: Onboarding session CRUD
//! - **event_service**: Calendar event CRUD
//! - **validation**: Title, color and date-range rules
//! - **clock**: Time source and ID timestamps
//! - **error**: [`DomainError`] and its variants
//!
//! ## Business Rules
//!
//! - Titles are trimmed and must be 1-256 characters
//! - An end date, when present, may not precede the start date
//! - A missing end date means a single-day item
//! - Range queries use inclusive overlap: an item is listed when it shares
//!   at least one day with the requested window

pub mod calendar;
pub mod clock;
pub mod error;
pub mod event_service;
pub mod session_service;
pub mod validation;

pub use calendar::CalendarService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{DomainError, DomainResult};
pub use event_service::EventService;
pub use session_service::SessionService;
