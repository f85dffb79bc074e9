//! In-memory queue backend.
//!
//! Keeps the last saved snapshot in process memory. Entries are lost on
//! restart; useful for local development and tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::backend::{QueueStorage, StorageError};
use super::models::QueueEntry;

#[derive(Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Vec<QueueEntry>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot, as if it had been saved earlier.
    pub fn with_entries(entries: Vec<QueueEntry>) -> Self {
        Self {
            snapshot: Mutex::new(entries),
            ..Self::default()
        }
    }

    /// Last saved snapshot
    pub fn snapshot(&self) -> Vec<QueueEntry> {
        self.snapshot
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }

    /// Make subsequent saves fail with an I/O error.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl QueueStorage for MemoryStorage {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> Result<Vec<QueueEntry>, StorageError> {
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|entry| !entry.device_id.is_empty())
            .collect())
    }

    async fn save(&self, entries: &[QueueEntry]) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::Relaxed) {
            return Err(StorageError::Io(std::io::Error::other(
                "memory storage configured to fail",
            )));
        }

        let mut snapshot = self.snapshot.lock().map_err(|_| {
            StorageError::Io(std::io::Error::other("memory storage lock poisoned"))
        })?;
        *snapshot = entries.to_vec();
        self.saves.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
