//! Mapping from core errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::errors::{AuthError, DatabaseError, Error as CoreError};
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    Status(StatusCode, String),
    Core(CoreError),
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::Status(StatusCode::BAD_REQUEST, detail.into())
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::Status(StatusCode::UNAUTHORIZED, detail.into())
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::Status(StatusCode::NOT_FOUND, detail.into())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

fn map_core(err: CoreError) -> (StatusCode, String) {
    match &err {
        CoreError::Auth(AuthError::EmailAlreadyExists) => {
            (StatusCode::CONFLICT, err.to_string())
        }
        CoreError::Auth(AuthError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, err.to_string())
        }
        CoreError::Auth(AuthError::SignupFailed(_)) => (StatusCode::BAD_REQUEST, err.to_string()),
        CoreError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        CoreError::Database(DatabaseError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        _ => {
            // Anything else is an infrastructure failure; log the detail and
            // keep the body opaque.
            tracing::error!("request failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Status(status, detail) => (status, detail),
            ApiError::Core(err) => map_core(err),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
