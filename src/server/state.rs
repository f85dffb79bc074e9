use std::sync::Arc;

use crate::auth::{AdminSessions, PasswordCheck};
use crate::config::Settings;
use crate::queue::{create_queue_storage, OpenHours, QueueStore};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub store: Arc<QueueStore>,
    pub sessions: Arc<AdminSessions>,
    pub password: Arc<PasswordCheck>,
}

impl AppState {
    /// Build state from settings, loading the queue from its configured backend.
    pub async fn new(settings: Settings) -> Self {
        let storage = create_queue_storage(&settings.queue);
        let hours = OpenHours::system(settings.queue.open_hour, settings.queue.close_hour);
        let store = Arc::new(QueueStore::load(storage, hours).await);

        Self::with_store(settings, store)
    }

    /// Build state around an already constructed store.
    pub fn with_store(settings: Settings, store: Arc<QueueStore>) -> Self {
        let sessions = Arc::new(AdminSessions::new(&settings.admin));
        let password = Arc::new(PasswordCheck::new(&settings.admin));

        Self {
            settings: Arc::new(settings),
            store,
            sessions,
            password,
        }
    }
}
