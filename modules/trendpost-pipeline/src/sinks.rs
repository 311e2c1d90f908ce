//! Record sources and sinks at the edges of a run.
//!
//! Each record is written as one complete JSON line, so an interrupted run
//! leaves only whole records behind.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::warn;
use trendpost_common::{PipelineError, ProductRecord};

/// One input row: the record, or why it could not be read.
pub type ProductRow = std::result::Result<ProductRecord, PipelineError>;

/// Read the collection stage's product list (a JSON array).
///
/// Only an unreadable file or a non-array document fails the load. Rows are
/// decoded one at a time, so a malformed row comes back as an `InputInvalid`
/// entry at its position and the rest of the list is unaffected.
pub async fn load_products(path: &Path) -> Result<Vec<ProductRow>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read products from {}", path.display()))?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse products in {}", path.display()))?;

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            serde_json::from_value::<ProductRecord>(row).map_err(|e| {
                warn!(index, error = %e, "Unreadable product row");
                PipelineError::InputInvalid(format!("row {index}: {e}"))
            })
        })
        .collect())
}

// ---------------------------------------------------------------------------
// RecordSink
// ---------------------------------------------------------------------------

#[async_trait]
pub trait RecordSink<T: Sync>: Send + Sync {
    /// Persist one fully built record.
    async fn persist(&self, record: &T) -> Result<()>;
}

/// Appends one JSON object per line to a file.
pub struct JsonLinesSink {
    path: PathBuf,
    file: tokio::sync::Mutex<tokio::fs::File>,
}

impl JsonLinesSink {
    /// Create (or truncate) `path`, creating parent directories as needed.
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = tokio::fs::File::create(&path)
            .await
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(Self {
            path,
            file: tokio::sync::Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl<T: Serialize + Sync> RecordSink<T> for JsonLinesSink {
    async fn persist(&self, record: &T) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes())
            .await
            .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        file.flush().await?;
        Ok(())
    }
}

/// Keeps records in memory. Useful for library callers and tests.
pub struct MemorySink<T> {
    records: Mutex<Vec<T>>,
}

impl<T: Clone> MemorySink<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<T> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl<T: Clone> Default for MemorySink<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> RecordSink<T> for MemorySink<T> {
    async fn persist(&self, record: &T) -> Result<()> {
        self.records
            .lock()
            .map_err(|_| anyhow::anyhow!("memory sink lock poisoned"))?
            .push(record.clone());
        Ok(())
    }
}
