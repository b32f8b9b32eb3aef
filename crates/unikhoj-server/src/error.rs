//! HTTP error type for the `UniKhoj` server.
//!
//! Every error renders as `{"error": "<message>"}`. Internal failures are
//! logged with their detail and answered with a fixed message so storage
//! internals never reach clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use unikhoj_core::wire::ErrorResponse;
use unikhoj_storage::StorageError;

/// Body text of every `500` response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error returned from HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Client sent invalid input; the message is sent verbatim.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Server-side failure; the detail is logged, not sent.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "lead creation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_owned(),
                )
            }
        };

        (status, axum::Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::Internal(err.to_string())
    }
}
