//! # HTTP Errors
//!
//! Maps domain and extractor failures to status codes and the JSON error
//! body `{ message, timestamp, details, errors }`.

use std::any::Any;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::popsicle::{FieldError, PopsicleError};

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

const INVALID_REQUEST: &str = "The popsicle request is invalid";
const INTERNAL_MESSAGE: &str = "An internal server error occurred";

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Popsicle(#[from] PopsicleError),

    /// Body missing, not JSON, or wrong shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path segment that is not a valid id
    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    /// Numeric id outside the range the store assigns
    #[error("Popsicle with ID {0} does not exist")]
    UnknownId(i64),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Popsicle(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::InvalidBody(_) | ApiError::InvalidPath(_) | ApiError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UnknownId(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidPath(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldMessage>,
}

/// Field-level validation message as sent to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}

impl From<&FieldError> for FieldMessage {
    fn from(err: &FieldError) -> Self {
        Self {
            field: err.field.to_string(),
            message: err.message.clone(),
        }
    }
}

impl ErrorResponse {
    fn new(message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
            details,
            errors: Vec::new(),
        }
    }
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Popsicle(PopsicleError::Validation(fields)) => {
                let mut body = ErrorResponse::new(
                    INVALID_REQUEST,
                    Some("One or more fields failed validation".to_string()),
                );
                body.errors = fields.iter().map(FieldMessage::from).collect();
                body
            }
            ApiError::Popsicle(PopsicleError::NotFound(_)) | ApiError::UnknownId(_) => {
                ErrorResponse::new(
                    err.to_string(),
                    Some("The requested resource was not found".to_string()),
                )
            }
            ApiError::InvalidBody(detail)
            | ApiError::InvalidPath(detail)
            | ApiError::InvalidQuery(detail) => {
                ErrorResponse::new(INVALID_REQUEST, Some(detail.clone()))
            }
            // Internal detail stays in the server log
            ApiError::Popsicle(PopsicleError::Internal(_)) | ApiError::Internal(_) => {
                ErrorResponse::new(INTERNAL_MESSAGE, Some("Please try again later".to_string()))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if self.is_internal() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}

/// Converts a handler panic into the generic 500 body
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    ApiError::Internal(detail).into_response()
}
