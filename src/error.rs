// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::constants::{
    INTERNAL_SERVER_ERROR_MESSAGE, INVALID_ID_MESSAGE, METHOD_NOT_ALLOWED_MESSAGE,
};
use crate::database::DatabaseError;

/// Error surfaced by a handler. Every variant renders as `{status, message}`
/// with a fixed client-facing message; internal detail is logged only.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400: missing or malformed identifier, reference or body
    #[error("Bad request: {0}")]
    BadRequest(&'static str),

    /// 404: target document absent
    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// 405: verb not served by the route
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// 500: anything the data layer could not complete
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe message
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => *msg,
            ApiError::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE,
            ApiError::Internal(_) => INTERNAL_SERVER_ERROR_MESSAGE,
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::Internal(detail.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::InvalidId(_) => ApiError::BadRequest(INVALID_ID_MESSAGE),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Internal(detail) = &self {
            tracing::error!(error = %detail, "{}", INTERNAL_SERVER_ERROR_MESSAGE);
        }

        let status = self.status_code();
        let body = json!({
            "status": status.as_u16(),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for handler return values
pub type ApiResult<T> = Result<crate::middleware::ApiResponse<T>, ApiError>;
