use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

pub const SESSIONS_FILE: &str = "sessions.csv";
pub const EVENTS_FILE: &str = "events.csv";

/// CsvConnection manages the data directory and the CSV files inside it
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
    /// Serializes read-modify-write cycles across every clone of the connection
    write_lock: Arc<Mutex<()>>,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).with_context(|| {
                format!("Failed to create data directory {}", base_path.display())
            })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Get the base directory path
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.base_directory.join(file_name)
    }

    /// Ensure a CSV file exists with the given header, returning its path
    pub fn ensure_file_exists(&self, file_name: &str, header: &[&str]) -> Result<PathBuf> {
        let file_path = self.file_path(file_name);

        // create_new: never truncate a file written by a concurrent store
        match OpenOptions::new().write(true).create_new(true).open(&file_path) {
            Ok(mut file) => {
                file.write_all(format!("{}\n", header.join(",")).as_bytes())
                    .with_context(|| format!("Failed to write header to {}", file_path.display()))?;
                info!("Created CSV file: {}", file_path.display());
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create {}", file_path.display()));
            }
        }

        Ok(file_path)
    }

    /// Acquire the write lock; hold the guard for the whole read-modify-write
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Replace `file_name` with `header` + `rows` through a temp file and a rename
    pub fn write_atomically(&self, file_name: &str, header: &[&str], rows: &[Vec<String>]) -> Result<()> {
        let file_path = self.file_path(file_name);
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to open {}", temp_path.display()))?;

            let mut csv_writer = csv::Writer::from_writer(BufWriter::new(file));
            csv_writer.write_record(header)?;
            for row in rows {
                csv_writer.write_record(row)?;
            }
            csv_writer.flush()?;
        }

        fs::rename(&temp_path, &file_path)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;

        Ok(())
    }
}
