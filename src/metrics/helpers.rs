//! Metrics helper structs for convenient metric recording

use prometheus::{Encoder, TextEncoder};

use super::{
    ADMIN_LOGINS_TOTAL, ADMIN_SESSIONS_ACTIVE, QUEUE_JOINS_TOTAL, QUEUE_LENGTH,
    QUEUE_PERSIST_FAILURES_TOTAL, QUEUE_REMOVALS_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording queue metrics
pub struct QueueMetrics;

impl QueueMetrics {
    /// Record a new entry appended to the queue
    pub fn record_joined() {
        QUEUE_JOINS_TOTAL.with_label_values(&["joined"]).inc();
    }

    /// Record a join for a device that was already in line
    pub fn record_already_present() {
        QUEUE_JOINS_TOTAL.with_label_values(&["already_present"]).inc();
    }

    /// Record a join rejected outside opening hours
    pub fn record_closed() {
        QUEUE_JOINS_TOTAL.with_label_values(&["closed"]).inc();
    }

    /// Record a join rejected for missing name or code
    pub fn record_missing() {
        QUEUE_JOINS_TOTAL.with_label_values(&["missing"]).inc();
    }

    /// Record entries removed
    pub fn record_removed(count: usize) {
        QUEUE_REMOVALS_TOTAL.inc_by(count as u64);
    }

    /// Record a failed save
    pub fn record_persist_failure() {
        QUEUE_PERSIST_FAILURES_TOTAL.inc();
    }

    /// Set the current queue length
    pub fn set_length(len: usize) {
        QUEUE_LENGTH.set(len as i64);
    }
}

/// Helper struct for recording admin metrics
pub struct AdminMetrics;

impl AdminMetrics {
    /// Record a successful login
    pub fn record_login_ok() {
        ADMIN_LOGINS_TOTAL.with_label_values(&["ok"]).inc();
    }

    /// Record a login with the wrong password
    pub fn record_login_rejected() {
        ADMIN_LOGINS_TOTAL.with_label_values(&["wrong_password"]).inc();
    }

    /// Set the number of live sessions
    pub fn set_active_sessions(count: usize) {
        ADMIN_SESSIONS_ACTIVE.set(count as i64);
    }
}
