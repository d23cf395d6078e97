//! Error type for admin API handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::announce::QueueError;

#[derive(Serialize)]
struct ErrorResponse {
    error: Option<String>,
    details: Option<String>,
}

/// Error returned by admin API handlers, rendered as JSON.
#[derive(Debug)]
pub struct ApiError {
    pub code: StatusCode,
    pub message: Option<String>,
    pub details: Option<String>,
}

impl ApiError {
    pub fn from_status(code: StatusCode) -> Self {
        Self {
            code,
            message: code.canonical_reason().map(str::to_string),
            details: None,
        }
    }
}

impl From<QueueError> for ApiError {
    fn from(value: QueueError) -> Self {
        ApiError {
            code: StatusCode::SERVICE_UNAVAILABLE,
            message: Some("Could not schedule announcement".to_string()),
            details: Some(value.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            details: self.details,
        });
        (self.code, body).into_response()
    }
}
