//! CSV file storage backend.

pub mod connection;
pub mod event_repository;
pub mod session_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use event_repository::CsvEventRepository;
pub use session_repository::CsvSessionRepository;
