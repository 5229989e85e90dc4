//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use tempus_core::error::{AppError, ErrorKind};

/// Handler result type: any `AppError` converts into an HTTP response.
pub type ApiResult<T> = Result<T, ApiError>;

/// Newtype carrying an `AppError` across the HTTP boundary.
#[derive(Debug, Clone)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = if err.is_unauthenticated() {
            StatusCode::UNAUTHORIZED
        } else {
            match err.kind {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::DuplicateId | ErrorKind::Conflict => StatusCode::CONFLICT,
                _ => {
                    tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        };

        // Server-side faults keep their details out of the response body.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
