//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error returned by handlers
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    NotFound,
    Unavailable(String),
    Internal(String),
}

impl From<textmod_core::Error> for AppError {
    fn from(err: textmod_core::Error) -> Self {
        use textmod_core::Error;

        match err {
            Error::InvalidInput(_) => AppError::InvalidRequest(err.to_string()),
            Error::Unavailable(_) | Error::Timeout => AppError::Unavailable(err.to_string()),
            _ => AppError::Internal(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request_error", msg)
            }
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found_error",
                "Not found".to_string(),
            ),
            AppError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "unavailable_error", msg)
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = json!({
            "error": {
                "message": message,
                "type": kind,
            }
        });

        (status, Json(body)).into_response()
    }
}
