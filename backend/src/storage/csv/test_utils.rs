//! Test utilities module for automatic cleanup and consistent test infrastructure
//!
//! The temp directory behind each [`TestEnvironment`] is removed when the
//! environment is dropped, even if the test panics.

use anyhow::Result;
use shared::{DateOnly, EventKind, EventSummary, SessionSummary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::CsvConnection;

/// RAII test environment owning an isolated data directory
pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("onboarding-calendar-")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }
}

fn date(value: &str) -> DateOnly {
    value.parse().expect("test dates are YYYY-MM-DD")
}

pub fn sample_session(id: &str, start: &str, end: Option<&str>) -> SessionSummary {
    SessionSummary {
        id: id.to_string(),
        title: format!("Onboarding {}", id),
        type_color: "#3b82f6".to_string(),
        start_date: date(start),
        end_date: end.map(date),
    }
}

pub fn sample_event(id: &str, start: &str, end: Option<&str>) -> EventSummary {
    EventSummary {
        id: id.to_string(),
        title: format!("Meeting {}", id),
        kind: EventKind::Meeting,
        start_date: date(start),
        end_date: end.map(date),
        is_all_day: false,
        color: "#f59e0b".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleans_up_on_drop() {
        let path = {
            let env = TestEnvironment::new().unwrap();
            assert!(env.base_directory().exists());
            env.base_path.clone()
        };
        assert!(!path.exists());
    }
}
