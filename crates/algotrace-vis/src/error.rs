//! API errors and their HTTP mapping.

use algotrace_core::TraceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable code, e.g. `INVALID_INPUT`
    pub code: &'static str,
    pub message: String,
}

/// Errors surfaced by the HTTP API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A generator rejected its input (400).
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// The request made sense as JSON but not as a command (400).
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Trace(_) => "INVALID_INPUT",
            ApiError::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = ApiErrorDetail {
            code: self.code(),
            message: self.to_string(),
        };
        tracing::warn!(code = detail.code, message = %detail.message, "request rejected");
        (StatusCode::BAD_REQUEST, Json(detail)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_errors_keep_their_message() {
        let err = ApiError::from(TraceError::InvalidTarget("x".into()));
        assert_eq!(err.code(), "INVALID_INPUT");
        assert_eq!(err.to_string(), TraceError::InvalidTarget("x".into()).to_string());

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
