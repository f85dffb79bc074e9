use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub queue_length: usize,
    pub is_open: bool,
    pub open_hour: u32,
    pub close_hour: u32,
    pub active_admin_sessions: usize,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let hours = state.store.hours();

    Json(StatsResponse {
        queue_length: state.store.len().await,
        is_open: hours.is_open(),
        open_hour: hours.open_hour(),
        close_hour: hours.close_hour(),
        active_admin_sessions: state.sessions.active_count(),
    })
}
