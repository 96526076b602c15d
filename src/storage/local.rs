//! Local filesystem snapshot storage.

use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::InventoryResults;

/// File-backed store for the snapshot and its error record.
pub struct SnapshotStore {
    snapshot_path: PathBuf,
    error_record_path: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at the given snapshot path.
    ///
    /// The error record lives beside it with an `.err` suffix.
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        let snapshot_path = snapshot_path.into();
        let mut error_record_path = snapshot_path.clone().into_os_string();
        error_record_path.push(".err");

        Self {
            snapshot_path,
            error_record_path: PathBuf::from(error_record_path),
        }
    }

    /// Path of the primary snapshot file.
    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Path of the error record file.
    pub fn error_record_path(&self) -> &Path {
        &self.error_record_path
    }

    /// Load the last persisted snapshot, `None` if it has never been written.
    pub async fn load_snapshot(&self) -> Result<Option<InventoryResults>> {
        self.read_json(&self.snapshot_path).await
    }

    /// Persist a result set as the snapshot, replacing any prior one.
    pub async fn write_snapshot(&self, results: &InventoryResults) -> Result<()> {
        self.write_json(&self.snapshot_path, results).await
    }

    /// Persist the raw input of a failed pass for later inspection.
    pub async fn write_error_record(&self, results: &InventoryResults) -> Result<()> {
        self.write_json(&self.error_record_path, results).await
    }

    /// Load the error record, `None` when no failed pass is on file.
    pub async fn load_error_record(&self) -> Result<Option<InventoryResults>> {
        self.read_json(&self.error_record_path).await
    }

    /// Delete the error record. Returns whether one existed.
    pub async fn clear_error_record(&self) -> Result<bool> {
        match tokio::fs::remove_file(&self.error_record_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut tmp = path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(path, &bytes).await
    }

    /// Read JSON data, returning None if the file doesn't exist.
    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}
