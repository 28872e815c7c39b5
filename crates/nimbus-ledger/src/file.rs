use crate::row::{LogRow, HEADER};
use async_trait::async_trait;
use nimbus_core::{LogError, LookupLog, WeatherRecord};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::trace;

/// Lookup log backed by a single comma-delimited file.
///
/// Appends are serialized through an async mutex and each one is a single
/// write of the header (for a new or empty file) plus the row, so concurrent
/// lookups never interleave rows or write the header twice.
#[derive(Debug)]
pub struct CsvLookupLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvLookupLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LookupLog for CsvLookupLog {
    async fn append(&self, record: &WeatherRecord) -> Result<(), LogError> {
        let row = LogRow::from(record);
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        let mut chunk = String::new();
        if file.metadata().await?.len() == 0 {
            chunk.push_str(HEADER);
            chunk.push('\n');
        }
        chunk.push_str(&row.to_string());
        chunk.push('\n');

        file.write_all(chunk.as_bytes()).await?;
        file.flush().await?;

        trace!(path = %self.path.display(), city = %row.city, "appended lookup log row");
        Ok(())
    }
}
