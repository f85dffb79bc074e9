//! Queue data models and error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::backend::StorageError;

/// One walk-in customer's place in the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Display name
    pub name: String,
    /// Caller-supplied order or ticket code
    pub code: String,
    /// Identity key of the joining client
    pub device_id: String,
}

impl QueueEntry {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        device_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            device_id: device_id.into(),
        }
    }
}

/// Result of a join request that was admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// 1-based position in the line
    pub position: usize,
    /// Device ID the entry is keyed by (generated when the caller had none)
    pub device_id: String,
    /// The device was already in line; nothing was written
    pub already_present: bool,
}

/// Errors returned by queue store operations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Join attempted outside the open window
    #[error("{message}")]
    Closed { message: String },

    /// Name or code was empty after trimming
    #[error("Missing name or code")]
    MissingFields,

    /// The durable mirror could not be written
    #[error("Failed to persist queue: {0}")]
    Persistence(#[from] StorageError),
}

pub type QueueResult<T> = Result<T, QueueError>;
