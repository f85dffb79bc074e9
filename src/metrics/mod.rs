//! Prometheus metrics for the walk-in queue service.
//!
//! - Join outcomes (joined, already present, closed, missing fields)
//! - Removals and current queue length
//! - Persistence failures
//! - Admin logins and live sessions

mod helpers;

pub use helpers::{encode_metrics, AdminMetrics, QueueMetrics};

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter,
    IntCounterVec, IntGauge,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "walkin";

lazy_static! {
    // ============================================================================
    // Queue Metrics
    // ============================================================================

    /// Join requests by outcome
    pub static ref QUEUE_JOINS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_queue_joins_total", METRIC_PREFIX),
        "Total join requests by outcome",
        &["outcome"]
    ).unwrap();

    /// Entries removed by an admin
    pub static ref QUEUE_REMOVALS_TOTAL: IntCounter = register_int_counter!(
        format!("{}_queue_removals_total", METRIC_PREFIX),
        "Total queue entries removed"
    ).unwrap();

    /// Current number of entries in line
    pub static ref QUEUE_LENGTH: IntGauge = register_int_gauge!(
        format!("{}_queue_length", METRIC_PREFIX),
        "Current number of entries in the queue"
    ).unwrap();

    /// Failed writes of the durable mirror
    pub static ref QUEUE_PERSIST_FAILURES_TOTAL: IntCounter = register_int_counter!(
        format!("{}_queue_persist_failures_total", METRIC_PREFIX),
        "Total failures while persisting the queue"
    ).unwrap();

    // ============================================================================
    // Admin Metrics
    // ============================================================================

    /// Admin login attempts by result
    pub static ref ADMIN_LOGINS_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_admin_logins_total", METRIC_PREFIX),
        "Total admin login attempts by result",
        &["result"]
    ).unwrap();

    /// Live admin sessions
    pub static ref ADMIN_SESSIONS_ACTIVE: IntGauge = register_int_gauge!(
        format!("{}_admin_sessions_active", METRIC_PREFIX),
        "Number of unexpired admin sessions"
    ).unwrap();
}
