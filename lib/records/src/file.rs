//! Flat-file record store.
//!
//! Two UTF-8, newline-delimited resources: one reservation line per entry and
//! one feedback line per message. A missing file reads as empty.
//!
//! Every operation holds a single store-wide lock. Filtered removal writes the
//! surviving lines to a sibling temporary file and renames it over the
//! reservation file, so readers never observe a half-written file.

use crate::entry::ReservationEntry;
use crate::error::RecordError;
use crate::store::RecordStore;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use studio_bot_core::Result;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Record store backed by two text files.
#[derive(Debug)]
pub struct FileRecordStore {
    reservations_path: PathBuf,
    feedback_path: PathBuf,
    lock: Mutex<()>,
}

impl FileRecordStore {
    /// Creates a store over the given files. Nothing is touched on disk yet.
    #[must_use]
    pub fn new(reservations_path: impl Into<PathBuf>, feedback_path: impl Into<PathBuf>) -> Self {
        Self {
            reservations_path: reservations_path.into(),
            feedback_path: feedback_path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the reservation resource.
    #[must_use]
    pub fn reservations_path(&self) -> &Path {
        &self.reservations_path
    }

    /// Path of the feedback resource.
    #[must_use]
    pub fn feedback_path(&self) -> &Path {
        &self.feedback_path
    }
}

fn read_failed(path: &Path, err: &std::io::Error) -> RecordError {
    RecordError::ReadFailed {
        path: path.display().to_string(),
        details: err.to_string(),
    }
}

fn write_failed(path: &Path, err: &std::io::Error) -> RecordError {
    RecordError::WriteFailed {
        path: path.display().to_string(),
        details: err.to_string(),
    }
}

async fn read_all(path: &Path) -> Result<String, RecordError> {
    match fs::read_to_string(path).await {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(read_failed(path, &e).into()),
    }
}

async fn append_line(path: &Path, line: &str) -> Result<(), RecordError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| write_failed(path, &e))?;

    let mut buf = String::with_capacity(line.len() + 1);
    buf.push_str(line);
    buf.push('\n');

    file.write_all(buf.as_bytes())
        .await
        .map_err(|e| write_failed(path, &e))?;
    // tokio hands writes to a blocking thread; flush waits for them to land.
    file.flush().await.map_err(|e| write_failed(path, &e))?;
    Ok(())
}

async fn replace_contents(path: &Path, contents: &str) -> Result<(), RecordError> {
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)
        .await
        .map_err(|e| write_failed(&tmp_path, &e))?;
    fs::rename(&tmp_path, path)
        .await
        .map_err(|e| write_failed(path, &e))?;
    Ok(())
}

#[async_trait]
impl RecordStore for FileRecordStore {
    #[instrument(skip(self, entry), fields(class = %entry.class_label))]
    async fn append_reservation(&self, entry: &ReservationEntry) -> Result<(), RecordError> {
        let _guard = self.lock.lock().await;
        append_line(&self.reservations_path, &entry.to_line()).await?;
        debug!("reservation appended");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_reservations(&self) -> Result<Vec<ReservationEntry>, RecordError> {
        let _guard = self.lock.lock().await;
        let contents = read_all(&self.reservations_path).await?;

        let entries = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| {
                let parsed = ReservationEntry::from_line(line);
                if parsed.is_none() {
                    warn!(
                        line,
                        "skipping reservation line without a separator; it cannot be listed or cancelled"
                    );
                }
                parsed
            })
            .collect::<Vec<_>>();

        debug!(count = entries.len(), "reservations listed");
        Ok(entries)
    }

    #[instrument(skip(self, entry), fields(class = %entry.class_label))]
    async fn remove_reservations(&self, entry: &ReservationEntry) -> Result<usize, RecordError> {
        let _guard = self.lock.lock().await;
        let contents = read_all(&self.reservations_path).await?;

        let mut removed = 0;
        let kept = contents
            .split_inclusive('\n')
            .filter(|line| {
                let matched = entry.matches_line(line);
                if matched {
                    removed += 1;
                }
                !matched
            })
            .collect::<String>();

        if removed > 0 {
            replace_contents(&self.reservations_path, &kept).await?;
        }

        debug!(removed, "reservations removed");
        Ok(removed)
    }

    #[instrument(skip_all)]
    async fn append_feedback(&self, text: &str) -> Result<(), RecordError> {
        let _guard = self.lock.lock().await;
        append_line(&self.feedback_path, text).await?;
        debug!("feedback appended");
        Ok(())
    }
}
