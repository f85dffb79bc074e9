//! Queue storage factory

use std::sync::Arc;

use crate::config::QueueConfig;

use super::backend::QueueStorage;
use super::file_backend::JsonFileStorage;
use super::memory_backend::MemoryStorage;

/// Create a queue storage backend based on configuration.
///
/// - `"memory"`: Returns a `MemoryStorage`; nothing survives a restart
/// - `"file"` (default): Returns a `JsonFileStorage` writing `settings.file`
pub fn create_queue_storage(settings: &QueueConfig) -> Arc<dyn QueueStorage> {
    match settings.backend.as_str() {
        "memory" => {
            tracing::warn!(
                backend = "memory",
                "Creating memory queue storage, entries will not survive a restart"
            );
            Arc::new(MemoryStorage::new())
        }
        "file" => {
            tracing::info!(backend = "file", path = %settings.file, "Creating file queue storage");
            Arc::new(JsonFileStorage::new(&settings.file))
        }
        other => {
            tracing::warn!(
                backend = %other,
                path = %settings.file,
                "Unknown queue backend, falling back to file"
            );
            Arc::new(JsonFileStorage::new(&settings.file))
        }
    }
}
