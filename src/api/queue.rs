//! Customer-facing queue endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::extract::ApiJson;
use crate::error::Result;
use crate::server::AppState;

const ALREADY_IN_QUEUE: &str = "Already in queue";

#[derive(Debug, Default, Deserialize)]
pub struct JoinRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JoinResponse {
    pub position: usize,
    pub device_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueueStatusResponse {
    pub in_queue: bool,
    pub position: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyPositionRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PositionResponse {
    pub position: usize,
}

/// POST /api/join - Join the queue (also served at POST /join)
#[tracing::instrument(name = "http.join", skip(state, request))]
pub async fn join(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<JoinRequest>,
) -> Result<Json<JoinResponse>> {
    let outcome = state
        .store
        .join(&request.name, &request.code, request.device_id.as_deref())
        .await?;

    Ok(Json(JoinResponse {
        position: outcome.position,
        device_id: outcome.device_id,
        message: outcome
            .already_present
            .then(|| ALREADY_IN_QUEUE.to_string()),
    }))
}

/// GET /api/status/{device_id} - Position of a device in the queue
#[tracing::instrument(name = "http.status", skip(state))]
pub async fn status(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Json<QueueStatusResponse> {
    let position = state.store.position_of(&device_id).await;

    Json(QueueStatusResponse {
        in_queue: position > 0,
        position,
    })
}

/// POST /position - Position lookup by name and code
#[tracing::instrument(name = "http.legacy_position", skip(state, request))]
pub async fn legacy_position(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LegacyPositionRequest>,
) -> Json<PositionResponse> {
    let position = state
        .store
        .legacy_position(&request.name, &request.code)
        .await;

    Json(PositionResponse { position })
}
