//! # API Errors
//!
//! Maps schema and store failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{truncate_message, Logger};
use crate::schema::{FieldError, ValidationError};
use crate::store::StoreError;

/// Longest store error text returned to clients
pub const MAX_ERROR_CHARS: usize = 80;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Payload failed Person validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Query parameter could not be parsed
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store unavailable or operation failed
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidQueryParam(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let code = err.status_code().as_u16();
        match err {
            ApiError::Validation(e) => Self {
                code,
                error: "Validation failed".to_string(),
                details: Some(e.into_details()),
            },
            ApiError::Store(e) => Self {
                code,
                error: truncate_message(&e.to_string(), MAX_ERROR_CHARS),
                details: None,
            },
            other => Self {
                code,
                error: other.to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Store(e) => Logger::error("STORE_ERROR", &[("error", &e.to_string())]),
            ApiError::Internal(msg) => Logger::error("REQUEST_FAILED", &[("error", msg)]),
            _ => {}
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let validation = ApiError::from(ValidationError::single(FieldError::missing_field("name")));
        assert_eq!(validation.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            ApiError::InvalidQueryParam("limit".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(StoreError::NotConfigured("DATABASE_URL")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_body_carries_details() {
        let err = ApiError::from(ValidationError::new(vec![
            FieldError::missing_field("name"),
            FieldError::new("tier", "must be one of 1, 2, 3, 4, got 7"),
        ]));
        let body = serde_json::to_value(ErrorResponse::from(err)).unwrap();
        assert_eq!(body["code"], 422);
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
        assert_eq!(body["details"][1]["field"], "tier");
    }

    #[test]
    fn test_store_message_truncated() {
        let err = ApiError::from(StoreError::Io("x".repeat(500)));
        let body = ErrorResponse::from(err);
        assert_eq!(body.code, 500);
        assert_eq!(body.error.chars().count(), MAX_ERROR_CHARS);
        assert!(body.details.is_none());
    }
}
