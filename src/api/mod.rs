//! API layer - HTTP endpoint handlers organized by domain.

mod admin;
mod extract;
mod health;
mod metrics;
mod queue;
mod routes;

// Re-export all handlers for use in server/app.rs
pub use admin::{admin_login, admin_logout, admin_queue, admin_remove};
pub use admin::{LoginRequest, LoginResponse, RemoveRequest, StatusResponse};
pub use extract::ApiJson;
pub use health::{health, stats};
pub use metrics::prometheus_metrics;
pub use queue::{join, legacy_position, status};
pub use queue::{JoinRequest, JoinResponse, LegacyPositionRequest, PositionResponse, QueueStatusResponse};
pub use routes::api_routes;
