//! # Storage Module
//!
//! Handles all data persistence operations for the onboarding calendar.
//!
//! The domain layer only sees the [`SessionStorage`] and [`EventStorage`]
//! traits; the CSV implementation in [`csv`] can be swapped for another
//! backend without touching the services or the REST layer.
//!
//! ## Current Implementation
//!
//! - **Primary Storage**: one CSV file per entity kind under the data directory
//! - **Atomic Writes**: files are rewritten through a temp file and a rename
//! - **Tolerant Reads**: unparseable rows are skipped with a warning

pub mod csv;
pub mod traits;

pub use self::csv::{CsvConnection, CsvEventRepository, CsvSessionRepository};
pub use traits::{EventStorage, SessionStorage};
