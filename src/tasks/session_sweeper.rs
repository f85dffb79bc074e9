use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;

use crate::auth::AdminSessions;

/// Background task that drops expired admin sessions
pub struct SessionSweeperTask {
    interval: Duration,
    sessions: Arc<AdminSessions>,
    shutdown: broadcast::Receiver<()>,
}

impl SessionSweeperTask {
    pub fn new(
        interval_secs: u64,
        sessions: Arc<AdminSessions>,
        shutdown: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            interval: Duration::from_secs(interval_secs.max(1)),
            sessions,
            shutdown,
        }
    }

    /// Run until a shutdown signal arrives
    pub async fn run(mut self) {
        let mut cleanup_timer = tokio::time::interval(self.interval);

        // Skip immediate first tick
        cleanup_timer.tick().await;

        tracing::info!(
            cleanup_interval_secs = self.interval.as_secs(),
            "Session sweeper started"
        );

        loop {
            tokio::select! {
                _ = self.shutdown.recv() => {
                    tracing::info!("Session sweeper received shutdown signal");
                    break;
                }
                _ = cleanup_timer.tick() => {
                    let purged = self.sessions.purge_expired();
                    if purged > 0 {
                        tracing::info!(
                            purged = purged,
                            active = self.sessions.active_count(),
                            "Expired admin sessions purged"
                        );
                    }
                }
            }
        }

        tracing::info!("Session sweeper stopped");
    }
}
