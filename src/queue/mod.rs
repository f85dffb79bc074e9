//! Walk-in queue.
//!
//! This module provides:
//! - `QueueStore`: the ordered line of customers with join, lookup and removal
//! - `OpenHours`: the local-time window during which joins are accepted
//! - Persistence backends mirroring the queue to a JSON file or to memory
//!
//! # Example
//!
//! ```ignore
//! let storage = create_queue_storage(&settings.queue);
//! let hours = OpenHours::system(settings.queue.open_hour, settings.queue.close_hour);
//! let store = QueueStore::load(storage, hours).await;
//!
//! let outcome = store.join("Ann", "A1", None).await?;
//! assert_eq!(store.position_of(&outcome.device_id).await, outcome.position);
//! ```

mod backend;
mod factory;
mod file_backend;
mod hours;
mod memory_backend;
mod models;
mod store;

pub use backend::{QueueStorage, StorageError};
pub use factory::create_queue_storage;
pub use file_backend::{decode_entries, JsonFileStorage};
pub use hours::{Clock, FixedClock, OpenHours, SystemClock};
pub use memory_backend::MemoryStorage;
pub use models::{JoinOutcome, QueueEntry, QueueError, QueueResult};
pub use store::QueueStore;
