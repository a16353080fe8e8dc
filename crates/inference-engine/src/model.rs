//! Classifier Implementations

use crate::InferenceError;
use feature_engine::{ScaledFeatureVector, FEATURE_DIMENSION};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;
use tract_onnx::prelude::*;

/// Binary churn outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChurnLabel {
    No,
    Yes,
}

impl ChurnLabel {
    /// Label for a predicted class index (1 = churn)
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            ChurnLabel::Yes
        } else {
            ChurnLabel::No
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnLabel::No => "No",
            ChurnLabel::Yes => "Yes",
        }
    }
}

impl fmt::Display for ChurnLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fitted binary classifier over scaled feature vectors
pub trait Classifier: Send + Sync + fmt::Debug {
    /// Predicted class
    fn predict(&self, features: &ScaledFeatureVector) -> Result<ChurnLabel, InferenceError>;

    /// Probability of the positive (churn) class
    fn predict_proba(&self, features: &ScaledFeatureVector) -> Result<f64, InferenceError>;

    /// Short model family name
    fn kind(&self) -> &'static str;
}

/// Logistic regression stored as plain coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    /// One weight per feature, in feature order
    pub coefficients: [f64; FEATURE_DIMENSION],
    pub intercept: f64,
}

impl LogisticModel {
    /// Linear decision value `w·x + b`
    pub fn decision_function(&self, features: &ScaledFeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.values.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }

    /// Whether every parameter is finite
    pub fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.coefficients.iter().all(|c| c.is_finite())
    }

    fn sigmoid(z: f64) -> f64 {
        if z >= 0.0 {
            1.0 / (1.0 + (-z).exp())
        } else {
            let e = z.exp();
            e / (1.0 + e)
        }
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &ScaledFeatureVector) -> Result<ChurnLabel, InferenceError> {
        let class = if self.decision_function(features) > 0.0 { 1 } else { 0 };
        Ok(ChurnLabel::from_class(class))
    }

    fn predict_proba(&self, features: &ScaledFeatureVector) -> Result<f64, InferenceError> {
        Ok(Self::sigmoid(self.decision_function(features)))
    }

    fn kind(&self) -> &'static str {
        "logistic"
    }
}

/// ONNX classifier executed with tract.
///
/// Expects a `[1, 12]` f32 input and two outputs: the predicted label
/// (i64) followed by class probabilities `[1, 2]` (f32). Models exported
/// from scikit-learn need the ZipMap post-processor disabled.
pub struct OnnxModel {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxModel {
    /// Load and optimize a model from disk
    pub fn load(path: &Path) -> TractResult<Self> {
        info!("Loading ONNX model from {}", path.display());

        let plan = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(0, f32::fact([1, FEATURE_DIMENSION]).into())?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { plan })
    }

    fn run(&self, features: &ScaledFeatureVector) -> Result<TVec<TValue>, InferenceError> {
        let values = features.to_f32();
        let input = Tensor::from_shape(&[1, FEATURE_DIMENSION], values.as_slice()).map_err(|e| {
            InferenceError::InvalidInputShape {
                expected: format!("[1, {}]", FEATURE_DIMENSION),
                actual: format!("{e:#}"),
            }
        })?;

        self.plan
            .run(tvec!(input.into()))
            .map_err(|e| InferenceError::InferenceFailed(format!("{e:#}")))
    }

    fn output<'a>(outputs: &'a TVec<TValue>, index: usize) -> Result<&'a TValue, InferenceError> {
        outputs.get(index).ok_or_else(|| {
            InferenceError::InferenceFailed(format!(
                "model produced {} outputs, expected at least {}",
                outputs.len(),
                index + 1
            ))
        })
    }
}

impl Classifier for OnnxModel {
    fn predict(&self, features: &ScaledFeatureVector) -> Result<ChurnLabel, InferenceError> {
        let outputs = self.run(features)?;
        let labels = Self::output(&outputs, 0)?
            .as_slice::<i64>()
            .map_err(|e| InferenceError::InferenceFailed(format!("{e:#}")))?;

        labels
            .first()
            .map(|&class| ChurnLabel::from_class(class))
            .ok_or_else(|| InferenceError::InferenceFailed("empty label output".to_string()))
    }

    fn predict_proba(&self, features: &ScaledFeatureVector) -> Result<f64, InferenceError> {
        let outputs = self.run(features)?;
        let probabilities = Self::output(&outputs, 1)?
            .as_slice::<f32>()
            .map_err(|e| InferenceError::InferenceFailed(format!("{e:#}")))?;

        // Row-major [1, 2]: index 1 is the churn class
        probabilities
            .get(1)
            .map(|&p| f64::from(p))
            .ok_or_else(|| InferenceError::InvalidInputShape {
                expected: "[1, 2] probabilities".to_string(),
                actual: format!("{} values", probabilities.len()),
            })
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}

impl fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxModel")
            .field("nodes", &self.plan.model().nodes.len())
            .finish()
    }
}
