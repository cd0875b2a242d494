//! # HTTP Errors
//!
//! Every failure leaves the API as `{"error": "<message>"}`. Engine text is
//! passed through verbatim.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::model::ValidationError;
use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request failed its contract
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body or query string could not be decoded
    #[error("{0}")]
    BadRequest(String),

    /// Targeted row does not exist
    #[error("{0}")]
    NotFound(String),

    /// Engine rejected a write (constraint, syntax, blocked statement)
    #[error("{0}")]
    Write(String),

    /// Engine failed during a read
    #[error("{0}")]
    Read(String),
}

impl ApiError {
    /// Wrap a store error raised on a read path
    pub fn read(err: StoreError) -> Self {
        ApiError::Read(err.to_string())
    }

    /// Wrap a store error raised on a write path
    pub fn write(err: StoreError) -> Self {
        ApiError::Write(err.to_string())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Write(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Read(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(ValidationError::MissingFields(vec!["ID"])).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("Person not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::write(StoreError::Rejected("x".to_string())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::read(StoreError::Rejected("x".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_engine_message_passthrough() {
        let err = ApiError::write(StoreError::Sqlite(rusqlite::Error::QueryReturnedNoRows));
        assert_eq!(err.to_string(), rusqlite::Error::QueryReturnedNoRows.to_string());
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let response = ApiError::not_found("Person not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Person not found"}));
    }
}
