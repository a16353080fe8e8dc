//! Validation Error Types

use thiserror::Error;

/// Errors while coercing submitted form fields
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Field could not be parsed into the expected type
    #[error("{field} must be {expected}, got {value:?}")]
    InvalidFormat {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Value out of allowed range
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::InvalidFormat { field, .. } => field,
            ValidationError::OutOfRange { field, .. } => field,
        }
    }
}
