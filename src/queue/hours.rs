//! Open-hours gate for new joins.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use chrono::{Local, Timelike};

/// Source of the current local wall-clock hour.
pub trait Clock: Send + Sync {
    fn local_hour(&self) -> u32;
}

/// Reads the host's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// Clock pinned to a settable hour.
#[derive(Debug)]
pub struct FixedClock {
    hour: AtomicU32,
}

impl FixedClock {
    pub fn new(hour: u32) -> Self {
        Self {
            hour: AtomicU32::new(hour),
        }
    }

    pub fn set_hour(&self, hour: u32) {
        self.hour.store(hour, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn local_hour(&self) -> u32 {
        self.hour.load(Ordering::Relaxed)
    }
}

/// Half-open window `[open_hour, close_hour)` of local hours during which
/// joins are accepted.
#[derive(Clone)]
pub struct OpenHours {
    open_hour: u32,
    close_hour: u32,
    clock: Arc<dyn Clock>,
}

impl OpenHours {
    pub fn new(open_hour: u32, close_hour: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            open_hour,
            close_hour,
            clock,
        }
    }

    /// Window backed by the system clock
    pub fn system(open_hour: u32, close_hour: u32) -> Self {
        Self::new(open_hour, close_hour, Arc::new(SystemClock))
    }

    pub fn open_hour(&self) -> u32 {
        self.open_hour
    }

    pub fn close_hour(&self) -> u32 {
        self.close_hour
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.open_hour <= hour && hour < self.close_hour
    }

    pub fn is_open(&self) -> bool {
        self.contains(self.clock.local_hour())
    }

    /// Message shown to callers turned away outside the window.
    pub fn closed_message(&self) -> String {
        format!(
            "Queue open from {:02}:00 to {:02}:00",
            self.open_hour, self.close_hour
        )
    }
}

impl std::fmt::Debug for OpenHours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenHours")
            .field("open_hour", &self.open_hour)
            .field("close_hour", &self.close_hour)
            .finish()
    }
}
