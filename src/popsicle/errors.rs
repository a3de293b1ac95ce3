//! # Popsicle Errors

use serde::Serialize;
use thiserror::Error;

/// Result type for popsicle operations
pub type PopsicleResult<T> = Result<T, PopsicleError>;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Popsicle errors
#[derive(Debug, Clone, Error)]
pub enum PopsicleError {
    /// No record with this id
    #[error("Popsicle with ID {0} does not exist")]
    NotFound(u64),

    /// Input violated one or more field constraints
    #[error("The popsicle request is invalid")]
    Validation(Vec<FieldError>),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PopsicleError {
    /// Validation error for a single field
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            PopsicleError::NotFound(_) => 404,
            PopsicleError::Validation(_) => 400,
            PopsicleError::Internal(_) => 500,
        }
    }

    /// Field-level messages, empty unless this is a validation error
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            PopsicleError::Validation(errors) => errors,
            _ => &[],
        }
    }
}
