//! Pipeline Error Types

use data_validator::{CategoricalField, ValidationError};
use thiserror::Error;

/// Errors while turning a submission into a scaled feature vector
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// A field was missing or could not be coerced
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Tenure of zero months leaves per-month features undefined
    #[error("Tenure must be greater than zero")]
    DivisionByZero,

    /// Categorical value not seen when the encoders were fitted
    #[error("Unknown {field} category {value:?}")]
    UnknownCategory {
        field: CategoricalField,
        value: String,
    },
}

impl PipelineError {
    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidInput(_) => "invalid_input",
            PipelineError::DivisionByZero => "division_by_zero",
            PipelineError::UnknownCategory { .. } => "unknown_category",
        }
    }
}

/// Malformed category encoder parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncoderError {
    #[error("No encoder for field {0}")]
    MissingField(CategoricalField),
    #[error("Encoder for {0} has an empty vocabulary")]
    EmptyVocabulary(CategoricalField),
    #[error("Encoder for {field} lists {value:?} more than once")]
    DuplicateClass {
        field: CategoricalField,
        value: String,
    },
}

/// Malformed scaler parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScalerError {
    #[error("Scaler parameter {param}[{index}] is not finite")]
    NonFinite { param: &'static str, index: usize },
    #[error("Scaler scale[{0}] is zero")]
    ZeroScale(usize),
}
