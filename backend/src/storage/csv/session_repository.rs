use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord};
use shared::{DateOnly, DateSpan, SessionSummary};
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info, warn};

use super::connection::{CsvConnection, SESSIONS_FILE};
use crate::storage::traits::SessionStorage;

const SESSION_HEADER: [&str; 5] = ["id", "title", "type_color", "start_date", "end_date"];

/// CSV-based onboarding session repository
#[derive(Clone)]
pub struct CsvSessionRepository {
    connection: CsvConnection,
}

impl CsvSessionRepository {
    /// Create a new CSV session repository
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read all sessions from the CSV file, skipping rows that fail to parse
    fn read_sessions(&self) -> Result<Vec<SessionSummary>> {
        let file_path = self
            .connection
            .ensure_file_exists(SESSIONS_FILE, &SESSION_HEADER)?;
        let file = File::open(&file_path)
            .with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut sessions = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping unreadable session row {}: {}", index + 2, e);
                    continue;
                }
            };
            match parse_session_record(&record) {
                Ok(session) => sessions.push(session),
                // +2: 1-based line numbers and the header line
                Err(e) => warn!("Skipping unreadable session row {}: {}", index + 2, e),
            }
        }

        Ok(sessions)
    }

    /// Write all sessions to the CSV file
    fn write_sessions(&self, sessions: &[SessionSummary]) -> Result<()> {
        let rows: Vec<Vec<String>> = sessions.iter().map(session_to_row).collect();
        self.connection
            .write_atomically(SESSIONS_FILE, &SESSION_HEADER, &rows)
    }
}

#[async_trait]
impl SessionStorage for CsvSessionRepository {
    async fn store_session(&self, session: &SessionSummary) -> Result<()> {
        let _guard = self.connection.lock().await;

        let mut sessions = self.read_sessions()?;
        if sessions.iter().any(|s| s.id == session.id) {
            bail!("Session {} already exists", session.id);
        }

        sessions.push(session.clone());
        self.write_sessions(&sessions)?;

        info!("Stored session {} ({})", session.id, session.title);
        Ok(())
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<SessionSummary>> {
        let sessions = self.read_sessions()?;
        Ok(sessions.into_iter().find(|s| s.id == session_id))
    }

    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        self.read_sessions()
    }

    async fn list_sessions_in_range(&self, start: DateOnly, end: DateOnly) -> Result<Vec<SessionSummary>> {
        let sessions: Vec<SessionSummary> = self
            .read_sessions()?
            .into_iter()
            .filter(|s| s.overlaps(start, end))
            .collect();

        debug!("Found {} sessions between {} and {}", sessions.len(), start, end);
        Ok(sessions)
    }

    async fn delete_session(&self, session_id: &str) -> Result<bool> {
        let _guard = self.connection.lock().await;

        let mut sessions = self.read_sessions()?;
        let before = sessions.len();
        sessions.retain(|s| s.id != session_id);

        if sessions.len() == before {
            return Ok(false);
        }

        self.write_sessions(&sessions)?;
        info!("Deleted session {}", session_id);
        Ok(true)
    }
}

fn parse_session_record(record: &StringRecord) -> Result<SessionSummary> {
    let field = |index: usize| {
        record
            .get(index)
            .ok_or_else(|| anyhow!("missing column `{}`", SESSION_HEADER[index]))
    };

    Ok(SessionSummary {
        id: field(0)?.to_string(),
        title: field(1)?.to_string(),
        type_color: field(2)?.to_string(),
        start_date: field(3)?.parse()?,
        end_date: parse_optional_date(field(4)?)?,
    })
}

fn session_to_row(session: &SessionSummary) -> Vec<String> {
    vec![
        session.id.clone(),
        session.title.clone(),
        session.type_color.clone(),
        session.start_date.to_string(),
        session.end_date.map(|d| d.to_string()).unwrap_or_default(),
    ]
}

pub(crate) fn parse_optional_date(value: &str) -> Result<Option<DateOnly>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(value.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{sample_session, TestEnvironment};

    fn date(s: &str) -> DateOnly {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_store_and_get_session() {
        let env = TestEnvironment::new().unwrap();
        let repo = CsvSessionRepository::new(env.connection.clone());

        let session = sample_session("session::1", "2024-07-16", None);
        repo.store_session(&session).await.unwrap();

        let loaded = repo.get_session("session::1").await.unwrap();
        assert_eq!(loaded, Some(session));
        assert_eq!(repo.get_session("session::404").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_round_trip_preserves_optional_end_date_and_commas() {
        let env = TestEnvironment::new().unwrap();
        let repo = CsvSessionRepository::new(env.connection.clone());

        let mut with_end = sample_session("session::1", "2024-07-30", Some("2024-08-02"));
        with_end.title = "Bienvenida, equipo de ventas".to_string();
        let without_end = sample_session("session::2", "2024-07-16", None);

        repo.store_session(&with_end).await.unwrap();
        repo.store_session(&without_end).await.unwrap();

        let all = repo.list_sessions().await.unwrap();
        assert_eq!(all, vec![with_end, without_end]);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let env = TestEnvironment::new().unwrap();
        let repo = CsvSessionRepository::new(env.connection.clone());

        let session = sample_session("session::1", "2024-07-16", None);
        repo.store_session(&session).await.unwrap();
        assert!(repo.store_session(&session).await.is_err());
        assert_eq!(repo.list_sessions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_in_range_uses_overlap() {
        let env = TestEnvironment::new().unwrap();
        let repo = CsvSessionRepository::new(env.connection.clone());

        repo.store_session(&sample_session("session::1", "2024-06-25", Some("2024-07-02")))
            .await
            .unwrap();
        repo.store_session(&sample_session("session::2", "2024-07-16", None))
            .await
            .unwrap();
        repo.store_session(&sample_session("session::3", "2024-08-10", None))
            .await
            .unwrap();

        let found = repo
            .list_sessions_in_range(date("2024-07-01"), date("2024-08-04"))
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["session::1", "session::2"]);
    }

    #[tokio::test]
    async fn test_delete_session() {
        let env = TestEnvironment::new().unwrap();
        let repo = CsvSessionRepository::new(env.connection.clone());

        repo.store_session(&sample_session("session::1", "2024-07-16", None))
            .await
            .unwrap();

        assert!(repo.delete_session("session::1").await.unwrap());
        assert!(!repo.delete_session("session::1").await.unwrap());
        assert!(repo.list_sessions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_rows_are_skipped() {
        let env = TestEnvironment::new().unwrap();
        std::fs::write(
            env.connection.file_path(SESSIONS_FILE),
            "id,title,type_color,start_date,end_date\n\
             session::1,Good,#fff,2024-07-16,\n\
             session::2,Bad date,#fff,16/07/2024,\n\
             session::3,Also good,#000,2024-07-17,2024-07-18\n",
        )
        .unwrap();

        let repo = CsvSessionRepository::new(env.connection.clone());
        let ids: Vec<_> = repo
            .list_sessions()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["session::1", "session::3"]);
    }

    #[tokio::test]
    async fn test_rows_with_invalid_utf8_are_skipped() {
        let env = TestEnvironment::new().unwrap();
        let mut content = b"id,title,type_color,start_date,end_date\n\
            session::1,Good,#fff,2024-07-16,\n"
            .to_vec();
        content.extend_from_slice(b"session::2,Bad \xff\xfe,#fff,2024-07-16,\n");
        content.extend_from_slice(b"session::3,Also good,#000,2024-07-17,\n");
        std::fs::write(env.connection.file_path(SESSIONS_FILE), content).unwrap();

        let repo = CsvSessionRepository::new(env.connection.clone());
        let ids: Vec<_> = repo
            .list_sessions()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["session::1", "session::3"]);

        // The file stays writable after a bad row was skipped
        repo.store_session(&sample_session("session::4", "2024-07-18", None))
            .await
            .unwrap();
        assert!(repo.get_session("session::4").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_stores_do_not_lose_writes() {
        let env = TestEnvironment::new().unwrap();
        let repo = CsvSessionRepository::new(env.connection.clone());

        let mut handles = Vec::new();
        for i in 0..10 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                let session = sample_session(&format!("session::{}", i), "2024-07-16", None);
                repo.store_session(&session).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(repo.list_sessions().await.unwrap().len(), 10);
    }
}
