//! HTTP error handling and response conversion.
//!
//! Errors are rendered in the RPC error shape the UI expects:
//! `{ "error": <code>, "reason": <message>, "message": "<message> [<code>]" }`.
//! Storage errors keep their domain code; the UI shows `message` verbatim.

use crate::domain::storage::errors::StorageError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Unknown method or route (404).
    NotFound(String),

    /// Arguments missing or of the wrong type (400).
    BadRequest(String),

    /// Request body above the configured limit (413).
    PayloadTooLarge(String),

    /// Upload or signing failure, see [`StorageError`].
    Storage(StorageError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            Self::Storage(err) => write!(f, "{}: {}", err.kind(), err),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Storage(StorageError::InvalidData(_)) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::BucketNotFound(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(StorageError::UploadFailed(_) | StorageError::SigningFailed(_)) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not-found",
            Self::BadRequest(_) => "bad-request",
            Self::PayloadTooLarge(_) => "payload-too-large",
            Self::Storage(err) => err.kind(),
        }
    }

    /// Message shown to the user.
    fn reason(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::PayloadTooLarge(msg) => msg.clone(),
            Self::Storage(err) => err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let reason = self.reason();

        match status {
            StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE => {
                tracing::error!("error={}", self);
            }
            _ => {
                tracing::warn!("error={}", self);
            }
        }

        (
            status,
            Json(json!({
                "error": code,
                "reason": reason,
                "message": format!("{} [{}]", reason, code),
            })),
        )
            .into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}
