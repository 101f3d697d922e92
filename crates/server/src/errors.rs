use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use service::catalog::CatalogError;
use thiserror::Error;
use tracing::{debug, error};

/// Error response carrying `{ timestamp, status, error }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match &e {
            CatalogError::NotFound(msg) => {
                debug!(code = e.code(), error = %msg, "not found");
                Self::new(StatusCode::NOT_FOUND, msg.clone())
            }
            CatalogError::Conflict(msg) => {
                debug!(code = e.code(), error = %msg, "conflict");
                Self::new(StatusCode::BAD_REQUEST, msg.clone())
            }
            CatalogError::Store(msg) => {
                error!(code = e.code(), error = %msg, "store failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal store error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            status: self.status.as_u16(),
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
