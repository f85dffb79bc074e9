//! JSON file queue backend.
//!
//! The file holds a pretty-printed JSON array of `{name, code, device_id}`
//! objects. Saves write a sibling temp file and rename it over the target, so
//! a crash mid-write leaves either the old or the new content behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::backend::{QueueStorage, StorageError};
use super::models::QueueEntry;

/// Shape accepted when reading an element of the persisted array.
///
/// Only `device_id` is mandatory; older files may lack the other fields.
#[derive(Debug, Deserialize)]
struct PersistedEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    code: String,
    #[serde(default)]
    device_id: Option<String>,
}

/// Queue backend that mirrors the queue into a single JSON file.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "queue.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Decode persisted file content, keeping only entries with a device ID.
///
/// Anything other than a JSON array is a decode error. Elements that are not
/// objects or carry non-string fields are skipped individually.
pub fn decode_entries(bytes: &[u8]) -> Result<Vec<QueueEntry>, StorageError> {
    let value: Value = serde_json::from_slice(bytes)?;

    let Value::Array(items) = value else {
        return Err(StorageError::InvalidFormat(
            "expected a JSON array of entries".to_string(),
        ));
    };

    let total = items.len();
    let entries: Vec<QueueEntry> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<PersistedEntry>(item).ok())
        .filter_map(|raw| match raw.device_id {
            Some(device_id) if !device_id.is_empty() => {
                Some(QueueEntry::new(raw.name, raw.code, device_id))
            }
            _ => None,
        })
        .collect();

    if entries.len() < total {
        tracing::warn!(
            kept = entries.len(),
            dropped = total - entries.len(),
            "Dropped persisted queue entries without a usable device_id"
        );
    }

    Ok(entries)
}

#[async_trait]
impl QueueStorage for JsonFileStorage {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> Result<Vec<QueueEntry>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "Queue file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        decode_entries(&bytes)
    }

    async fn save(&self, entries: &[QueueEntry]) -> Result<(), StorageError> {
        let body = serde_json::to_vec_pretty(entries)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &body).await?;
        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        tracing::debug!(
            path = %self.path.display(),
            entries = entries.len(),
            bytes = body.len(),
            "Queue file written"
        );

        Ok(())
    }
}
