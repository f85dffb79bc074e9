use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::queue::{QueueError, StorageError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Closed(String),

    #[error("Missing name or code")]
    MissingFields,

    #[error("Missing device_id")]
    MissingDeviceId,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Wrong password")]
    WrongPassword,

    /// Request body could not be read as the expected JSON
    #[error("{message}")]
    InvalidRequest { status: StatusCode, message: String },

    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<QueueError> for AppError {
    fn from(err: QueueError) -> Self {
        match err {
            QueueError::Closed { message } => AppError::Closed(message),
            QueueError::MissingFields => AppError::MissingFields,
            QueueError::Persistence(e) => AppError::Persistence(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Flat error body: `{"error": "<code>", "message": "<text>"}`
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Check if running in production mode (based on RUN_MODE env var)
fn is_production() -> bool {
    std::env::var("RUN_MODE")
        .map(|m| m == "production" || m == "prod")
        .unwrap_or(false)
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Closed(_) | AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::MissingFields | AppError::MissingDeviceId => StatusCode::BAD_REQUEST,
            AppError::WrongPassword => StatusCode::UNAUTHORIZED,
            AppError::InvalidRequest { status, .. } => *status,
            AppError::Persistence(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error code placed in the `error` field of the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Closed(_) => "closed",
            AppError::MissingFields => "missing",
            AppError::MissingDeviceId => "missing device_id",
            AppError::Unauthorized => "unauthorized",
            AppError::WrongPassword => "wrong_password",
            AppError::InvalidRequest { .. } => "invalid_request",
            AppError::Persistence(_) => "persistence_failure",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Render the error; `production` hides internal details from the client.
    fn render(self, production: bool) -> Response {
        let status = self.status();
        let code = self.code();
        let log_message = self.to_string();

        let client_message = match &self {
            AppError::Closed(message) => Some(message.clone()),
            AppError::MissingFields | AppError::InvalidRequest { .. } => Some(log_message.clone()),
            AppError::MissingDeviceId | AppError::Unauthorized | AppError::WrongPassword => None,
            AppError::Persistence(_) | AppError::Internal(_) => {
                if production {
                    None
                } else {
                    Some(log_message.clone())
                }
            }
        };

        if status.is_server_error() {
            tracing::error!(
                code = %code,
                status = %status.as_u16(),
                message = %log_message,
                "API error"
            );
        } else {
            tracing::debug!(
                code = %code,
                status = %status.as_u16(),
                message = %log_message,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            error: code,
            message: client_message,
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.render(is_production())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
