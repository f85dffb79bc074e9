// Shared components
pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;

// Domain layer
pub mod queue;

// Application layer
pub mod api;
pub mod server;

// Supporting modules
pub mod tasks;
pub mod telemetry;
