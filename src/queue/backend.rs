//! Backend trait for queue persistence.
//!
//! The queue store keeps the authoritative ordered list in memory and hands
//! the whole list to a backend after every mutation. Backends only need to
//! load and fully overwrite; there is no append or partial update.

use async_trait::async_trait;
use thiserror::Error;

use super::models::QueueEntry;

/// Errors that can occur while reading or writing the durable mirror.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Content could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Content decoded but does not have the expected shape
    #[error("Invalid queue format: {0}")]
    InvalidFormat(String),
}

/// Durable storage for the queue.
#[async_trait]
pub trait QueueStorage: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Read the persisted entries.
    ///
    /// A missing store is not an error and yields an empty list. Entries
    /// without a usable device ID must not be returned.
    async fn load(&self) -> Result<Vec<QueueEntry>, StorageError>;

    /// Replace the persisted entries with `entries`.
    async fn save(&self, entries: &[QueueEntry]) -> Result<(), StorageError>;
}
