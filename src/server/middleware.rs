use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};

use super::AppState;
use crate::auth::SESSION_COOKIE;
use crate::error::AppError;

/// Session token of an authenticated admin request, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AdminToken(pub String);

/// Admin session middleware.
/// Accepts the session token from `Authorization: Bearer` or the session cookie.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&req)
        .or_else(|| extract_session_cookie(&req))
        .map(str::to_string);

    match token {
        Some(token) if state.sessions.validate(&token) => {
            req.extensions_mut().insert(AdminToken(token));
            Ok(next.run(req).await)
        }
        Some(_) => {
            tracing::warn!(path = %req.uri().path(), "Invalid or expired admin session");
            Err(AppError::Unauthorized)
        }
        None => {
            tracing::warn!(path = %req.uri().path(), "Missing admin session");
            Err(AppError::Unauthorized)
        }
    }
}

/// Extract bearer token from Authorization header
pub fn extract_bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Extract the admin session token from the Cookie header
pub fn extract_session_cookie(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|v| !v.is_empty())
}
