//! Ordered walk-in queue with a durable mirror.

use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::metrics::QueueMetrics;

use super::backend::QueueStorage;
use super::hours::OpenHours;
use super::models::{JoinOutcome, QueueEntry, QueueError, QueueResult};

/// Separator used by the legacy `name_code` identity scheme.
const LEGACY_ID_SEPARATOR: &str = "_";

/// The walk-in queue.
///
/// Owns the ordered entry list. Every mutation runs read-modify-persist under
/// one lock, so the backend always receives the full, current list.
pub struct QueueStore {
    entries: Mutex<Vec<QueueEntry>>,
    storage: Arc<dyn QueueStorage>,
    hours: OpenHours,
}

impl QueueStore {
    /// Build a store from whatever the backend holds.
    ///
    /// Never fails: an unreadable or malformed store starts an empty queue.
    pub async fn load(storage: Arc<dyn QueueStorage>, hours: OpenHours) -> Self {
        let entries = match storage.load().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    backend = storage.name(),
                    error = %e,
                    "Failed to load queue, starting empty"
                );
                Vec::new()
            }
        };

        tracing::info!(
            backend = storage.name(),
            entries = entries.len(),
            "Queue loaded"
        );
        QueueMetrics::set_length(entries.len());

        Self {
            entries: Mutex::new(entries),
            storage,
            hours,
        }
    }

    pub fn hours(&self) -> &OpenHours {
        &self.hours
    }

    /// 1-based position of `device_id`, or 0 when it is not in line.
    pub async fn position_of(&self, device_id: &str) -> usize {
        let entries = self.entries.lock().await;
        position_in(&entries, device_id)
    }

    /// Put a device in line.
    ///
    /// A missing or empty `device_id` gets a fresh UUID. Joining again with a
    /// device that is already in line returns its current position without
    /// writing anything.
    #[tracing::instrument(name = "queue.join", skip(self, name, code))]
    pub async fn join(
        &self,
        name: &str,
        code: &str,
        device_id: Option<&str>,
    ) -> QueueResult<JoinOutcome> {
        let device_id = match device_id {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };

        if !self.hours.is_open() {
            QueueMetrics::record_closed();
            return Err(QueueError::Closed {
                message: self.hours.closed_message(),
            });
        }

        let name = name.trim();
        let code = code.trim();
        if name.is_empty() || code.is_empty() {
            QueueMetrics::record_missing();
            return Err(QueueError::MissingFields);
        }

        let mut entries = self.entries.lock().await;

        let existing = position_in(&entries, &device_id);
        if existing > 0 {
            QueueMetrics::record_already_present();
            tracing::debug!(device_id = %device_id, position = existing, "Device already in queue");
            return Ok(JoinOutcome {
                position: existing,
                device_id,
                already_present: true,
            });
        }

        entries.push(QueueEntry::new(name, code, device_id.clone()));
        if let Err(e) = self.storage.save(&entries).await {
            entries.pop();
            QueueMetrics::record_persist_failure();
            tracing::error!(
                backend = self.storage.name(),
                device_id = %device_id,
                error = %e,
                "Failed to persist queue after join"
            );
            return Err(e.into());
        }

        let position = entries.len();
        QueueMetrics::record_joined();
        QueueMetrics::set_length(position);
        tracing::info!(device_id = %device_id, position = position, "Joined queue");

        Ok(JoinOutcome {
            position,
            device_id,
            already_present: false,
        })
    }

    /// Drop every entry for `device_id` and persist the result.
    ///
    /// Removing a device that is not in line still succeeds. Returns the
    /// number of entries removed.
    #[tracing::instrument(name = "queue.remove", skip(self))]
    pub async fn remove(&self, device_id: &str) -> QueueResult<usize> {
        let mut entries = self.entries.lock().await;

        let remaining: Vec<QueueEntry> = entries
            .iter()
            .filter(|entry| entry.device_id != device_id)
            .cloned()
            .collect();
        let removed = entries.len() - remaining.len();

        if let Err(e) = self.storage.save(&remaining).await {
            QueueMetrics::record_persist_failure();
            tracing::error!(
                backend = self.storage.name(),
                device_id = %device_id,
                error = %e,
                "Failed to persist queue after removal"
            );
            return Err(e.into());
        }

        *entries = remaining;
        QueueMetrics::record_removed(removed);
        QueueMetrics::set_length(entries.len());
        tracing::info!(
            device_id = %device_id,
            removed = removed,
            remaining = entries.len(),
            "Removed from queue"
        );

        Ok(removed)
    }

    /// Position lookup under the old `name_code` identity scheme.
    ///
    /// Returns 0 when either field is blank. Never creates an entry.
    pub async fn legacy_position(&self, name: &str, code: &str) -> usize {
        let name = name.trim();
        let code = code.trim();
        if name.is_empty() || code.is_empty() {
            return 0;
        }

        let legacy_id = format!("{}{}{}", name, LEGACY_ID_SEPARATOR, code);
        self.position_of(&legacy_id).await
    }

    /// Copy of the whole ordered queue.
    pub async fn snapshot(&self) -> Vec<QueueEntry> {
        self.entries.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

fn position_in(entries: &[QueueEntry], device_id: &str) -> usize {
    entries
        .iter()
        .position(|entry| entry.device_id == device_id)
        .map(|index| index + 1)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::hours::FixedClock;
    use crate::queue::memory_backend::MemoryStorage;
    use tokio_test::{assert_err, assert_ok};

    struct Fixture {
        store: QueueStore,
        storage: Arc<MemoryStorage>,
        clock: Arc<FixedClock>,
    }

    async fn fixture_with(entries: Vec<QueueEntry>) -> Fixture {
        let storage = Arc::new(MemoryStorage::with_entries(entries));
        let clock = Arc::new(FixedClock::new(12));
        let hours = OpenHours::new(11, 23, clock.clone());
        let store = QueueStore::load(storage.clone(), hours).await;
        Fixture {
            store,
            storage,
            clock,
        }
    }

    async fn fixture() -> Fixture {
        fixture_with(Vec::new()).await
    }

    #[tokio::test]
    async fn test_distinct_joins_get_sequential_positions() {
        let f = fixture().await;

        for i in 1..=5 {
            let outcome = assert_ok!(
                f.store
                    .join(&format!("Guest {}", i), "C", Some(format!("dev-{}", i).as_str()))
                    .await
            );
            assert_eq!(outcome.position, i);
            assert!(!outcome.already_present);
        }

        for i in 1..=5 {
            assert_eq!(f.store.position_of(&format!("dev-{}", i)).await, i);
        }
        assert_eq!(f.storage.snapshot().len(), 5);
    }

    #[tokio::test]
    async fn test_generated_device_id_and_rejoin() {
        let f = fixture().await;

        let first = assert_ok!(f.store.join("Ann", "A1", Some("")).await);
        assert_eq!(first.position, 1);
        assert!(!first.already_present);
        assert!(Uuid::parse_str(&first.device_id).is_ok());

        let second = assert_ok!(f.store.join("Ann", "A1", Some(first.device_id.as_str())).await);
        assert_eq!(second.position, 1);
        assert!(second.already_present);
        assert_eq!(second.device_id, first.device_id);
        assert_eq!(f.store.len().await, 1);
        assert_eq!(f.storage.save_count(), 1);

        assert_eq!(assert_ok!(f.store.remove(&first.device_id).await), 1);
        assert!(f.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_device_id_generates_distinct_ids() {
        let f = fixture().await;

        let a = assert_ok!(f.store.join("Ann", "A1", None).await);
        let b = assert_ok!(f.store.join("Ann", "A1", None).await);
        assert_ne!(a.device_id, b.device_id);
        assert_eq!(b.position, 2);
    }

    #[tokio::test]
    async fn test_join_trims_fields() {
        let f = fixture().await;

        assert_ok!(f.store.join("  Ann ", " A1\n", Some("dev-1")).await);
        let snapshot = f.store.snapshot().await;
        assert_eq!(snapshot, vec![QueueEntry::new("Ann", "A1", "dev-1")]);
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let f = fixture().await;

        let err = assert_err!(f.store.join("", "A1", Some("dev-1")).await);
        assert!(matches!(err, QueueError::MissingFields));

        let err = assert_err!(f.store.join("Ann", "   ", Some("dev-1")).await);
        assert!(matches!(err, QueueError::MissingFields));

        assert!(f.store.is_empty().await);
        assert_eq!(f.storage.save_count(), 0);
    }

    #[tokio::test]
    async fn test_closed_outside_window_regardless_of_fields() {
        let f = fixture().await;

        for hour in [0, 10, 23] {
            f.clock.set_hour(hour);
            let err = assert_err!(f.store.join("Ann", "A1", Some("dev-1")).await);
            match err {
                QueueError::Closed { message } => {
                    assert_eq!(message, "Queue open from 11:00 to 23:00")
                }
                other => panic!("expected Closed, got {:?}", other),
            }

            // Closed takes precedence over validation
            let err = assert_err!(f.store.join("", "", None).await);
            assert!(matches!(err, QueueError::Closed { .. }));
        }

        f.clock.set_hour(22);
        assert_ok!(f.store.join("Ann", "A1", Some("dev-1")).await);
    }

    #[tokio::test]
    async fn test_reads_and_removal_ignore_hours() {
        let f = fixture().await;
        assert_ok!(f.store.join("Ann", "A1", Some("dev-1")).await);

        f.clock.set_hour(3);
        assert_eq!(f.store.position_of("dev-1").await, 1);
        assert_eq!(f.store.snapshot().await.len(), 1);
        assert_eq!(assert_ok!(f.store.remove("dev-1").await), 1);
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let f = fixture().await;
        assert_ok!(f.store.join("Ann", "A1", Some("dev-1")).await);

        assert_eq!(assert_ok!(f.store.remove("nobody").await), 0);
        assert_eq!(f.store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_shifts_later_positions() {
        let f = fixture().await;
        for id in ["dev-1", "dev-2", "dev-3", "dev-4"] {
            assert_ok!(f.store.join("Guest", "C", Some(id)).await);
        }

        assert_ok!(f.store.remove("dev-2").await);

        assert_eq!(f.store.len().await, 3);
        assert_eq!(f.store.position_of("dev-1").await, 1);
        assert_eq!(f.store.position_of("dev-2").await, 0);
        assert_eq!(f.store.position_of("dev-3").await, 2);
        assert_eq!(f.store.position_of("dev-4").await, 3);

        let persisted: Vec<_> = f
            .storage
            .snapshot()
            .into_iter()
            .map(|e| e.device_id)
            .collect();
        assert_eq!(persisted, vec!["dev-1", "dev-3", "dev-4"]);
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back_join() {
        let f = fixture().await;
        assert_ok!(f.store.join("Ann", "A1", Some("dev-1")).await);

        f.storage.set_fail_saves(true);
        let err = assert_err!(f.store.join("Bob", "B2", Some("dev-2")).await);
        assert!(matches!(err, QueueError::Persistence(_)));
        assert_eq!(f.store.len().await, 1);
        assert_eq!(f.store.position_of("dev-2").await, 0);

        let err = assert_err!(f.store.remove("dev-1").await);
        assert!(matches!(err, QueueError::Persistence(_)));
        assert_eq!(f.store.position_of("dev-1").await, 1);
    }

    #[tokio::test]
    async fn test_legacy_position() {
        let f = fixture_with(vec![
            QueueEntry::new("Ann", "A1", "dev-1"),
            QueueEntry::new("Bob", "B2", "Bob_B2"),
        ])
        .await;

        assert_eq!(f.store.legacy_position("Bob", "B2").await, 2);
        assert_eq!(f.store.legacy_position(" Bob ", "B2 ").await, 2);
        assert_eq!(f.store.legacy_position("Ann", "A1").await, 0);
        assert_eq!(f.store.legacy_position("", "B2").await, 0);
        assert_eq!(f.store.legacy_position("Bob", "").await, 0);
        assert_eq!(f.store.len().await, 2);
    }

    #[tokio::test]
    async fn test_load_keeps_persisted_order() {
        let f = fixture_with(vec![
            QueueEntry::new("Ann", "A1", "dev-1"),
            QueueEntry::new("Nobody", "X", ""),
            QueueEntry::new("Bob", "B2", "dev-2"),
        ])
        .await;

        assert_eq!(f.store.len().await, 2);
        assert_eq!(f.store.position_of("dev-2").await, 2);
    }

    #[tokio::test]
    async fn test_snapshot_is_detached() {
        let f = fixture().await;
        assert_ok!(f.store.join("Ann", "A1", Some("dev-1")).await);

        let mut snapshot = f.store.snapshot().await;
        snapshot.clear();
        assert_eq!(f.store.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_joins_keep_file_and_memory_in_step() {
        use crate::queue::file_backend::JsonFileStorage;
        use tempfile::TempDir;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("queue.json");
        let clock = Arc::new(FixedClock::new(12));
        let storage: Arc<dyn QueueStorage> = Arc::new(JsonFileStorage::new(&path));
        let store = Arc::new(
            QueueStore::load(storage.clone(), OpenHours::new(11, 23, clock)).await,
        );

        const TASKS: usize = 64;
        let mut handles = Vec::with_capacity(TASKS);
        for i in 0..TASKS {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let id = format!("d{}", i);
                assert_ok!(store.join("Guest", "C", Some(id.as_str())).await);
                assert_ok!(store.join("Shared", "S", Some("same")).await);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let in_memory = store.snapshot().await;
        let on_disk = assert_ok!(JsonFileStorage::new(&path).load().await);

        assert_eq!(in_memory.len(), TASKS + 1);
        assert_eq!(on_disk, in_memory);
        assert_eq!(
            on_disk.iter().filter(|e| e.device_id == "same").count(),
            1
        );
        for i in 0..TASKS {
            assert!(store.position_of(&format!("d{}", i)).await > 0);
        }
    }
}
