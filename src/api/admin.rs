//! Admin endpoints: login, queue listing and removal.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::extract::ApiJson;
use crate::auth::{CLEAR_SESSION_COOKIE, SESSION_COOKIE};
use crate::error::{AppError, Result};
use crate::metrics::AdminMetrics;
use crate::queue::QueueEntry;
use crate::server::{AdminToken, AppState};

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: String,
    pub token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RemoveRequest {
    #[serde(default)]
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

/// POST /api/admin/login - Exchange the admin password for a session
#[tracing::instrument(name = "http.admin_login", skip(state, request))]
pub async fn admin_login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<(HeaderMap, Json<LoginResponse>)> {
    if !state.password.verify(&request.password) {
        AdminMetrics::record_login_rejected();
        tracing::warn!("Admin login rejected");
        return Err(AppError::WrongPassword);
    }

    AdminMetrics::record_login_ok();
    let session = state.sessions.issue();

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        session.token,
        state.sessions.ttl().num_seconds()
    );
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|e| AppError::Internal(e.to_string()))?,
    );

    Ok((
        headers,
        Json(LoginResponse {
            status: "ok".to_string(),
            token: session.token,
        }),
    ))
}

/// POST /api/admin/logout - End the current admin session
#[tracing::instrument(name = "http.admin_logout", skip(state, token))]
pub async fn admin_logout(
    State(state): State<AppState>,
    Extension(token): Extension<AdminToken>,
) -> (HeaderMap, Json<StatusResponse>) {
    state.sessions.revoke(&token.0);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_static(CLEAR_SESSION_COOKIE),
    );

    (headers, Json(StatusResponse::ok()))
}

/// GET /api/admin/queue - Full ordered queue
#[tracing::instrument(name = "http.admin_queue", skip(state))]
pub async fn admin_queue(State(state): State<AppState>) -> Json<Vec<QueueEntry>> {
    Json(state.store.snapshot().await)
}

/// POST /api/admin/remove - Remove a device from the queue
#[tracing::instrument(name = "http.admin_remove", skip(state, request))]
pub async fn admin_remove(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RemoveRequest>,
) -> Result<Json<StatusResponse>> {
    let device_id = request
        .device_id
        .filter(|id| !id.is_empty())
        .ok_or(AppError::MissingDeviceId)?;

    state.store.remove(&device_id).await?;

    Ok(Json(StatusResponse::ok()))
}
