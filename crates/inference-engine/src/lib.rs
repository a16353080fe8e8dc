//! Churn Inference Engine
//!
//! Loads the fitted model, scaler and encoders once at startup and runs the
//! classifier on prepared feature vectors.

mod artifacts;
mod engine;
mod model;

pub use artifacts::{ArtifactLoadError, ArtifactPaths, ModelArtifacts};
pub use engine::{InferenceEngine, InferenceResult, Prediction};
pub use model::{ChurnLabel, Classifier, LogisticModel, OnnxModel};

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Model returned invalid probability {0}")]
    InvalidProbability(f64),
}
