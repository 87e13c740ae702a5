//! Error-to-response mapping for API handlers.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use renum_shared::AppError;

/// Renders an [`AppError`] as the standard JSON error envelope.
///
/// Server-side detail stays in the logs; 5xx responses carry a generic
/// message.
pub fn error_response(error: &AppError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = if status.is_server_error() {
        "An error occurred".to_string()
    } else {
        error.to_string()
    };

    (
        status,
        Json(json!({
            "error": error.error_code(),
            "message": message
        })),
    )
        .into_response()
}
