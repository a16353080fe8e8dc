//! Inference Engine Implementation

use crate::model::{ChurnLabel, Classifier};
use crate::InferenceError;
use feature_engine::ScaledFeatureVector;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Prediction result for one customer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted churn label
    pub label: ChurnLabel,
    /// Probability of churn (0.0 to 1.0)
    pub probability: f64,
    /// Probability rounded to two decimal places (ties to even), for display
    pub probability_rounded: f64,
}

impl Prediction {
    fn new(label: ChurnLabel, probability: f64) -> Self {
        Self {
            label,
            probability,
            probability_rounded: (probability * 100.0).round_ties_even() / 100.0,
        }
    }
}

/// Result of inference operation
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// The prediction
    pub prediction: Prediction,
    /// Inference latency
    pub latency: Duration,
}

/// Runs the fitted classifier on prepared feature vectors
#[derive(Debug)]
pub struct InferenceEngine {
    model: Box<dyn Classifier>,
}

impl InferenceEngine {
    /// Create a new inference engine
    pub fn new(model: Box<dyn Classifier>) -> Self {
        info!("Creating inference engine with {} model", model.kind());
        Self { model }
    }

    /// Predict label and churn probability.
    ///
    /// Both model queries receive the same vector, so the label and the
    /// probability always describe one evaluation.
    pub fn predict(&self, features: &ScaledFeatureVector) -> Result<InferenceResult, InferenceError> {
        let start = std::time::Instant::now();

        let label = self.model.predict(features)?;
        let probability = self.model.predict_proba(features)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(InferenceError::InvalidProbability(probability));
        }

        let latency = start.elapsed();
        debug!(
            "Prediction: {} (p={:.4}, latency={}us)",
            label,
            probability,
            latency.as_micros()
        );

        Ok(InferenceResult {
            prediction: Prediction::new(label, probability),
            latency,
        })
    }

    /// Model family name
    pub fn model_kind(&self) -> &'static str {
        self.model.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LogisticModel, OnnxModel};
    use feature_engine::FEATURE_DIMENSION;
    use std::path::Path;

    /// Classifier returning fixed outputs
    #[derive(Debug)]
    struct FixedModel {
        label: ChurnLabel,
        probability: f64,
    }

    impl Classifier for FixedModel {
        fn predict(&self, _: &ScaledFeatureVector) -> Result<ChurnLabel, InferenceError> {
            Ok(self.label)
        }

        fn predict_proba(&self, _: &ScaledFeatureVector) -> Result<f64, InferenceError> {
            Ok(self.probability)
        }

        fn kind(&self) -> &'static str {
            "fixed"
        }
    }

    fn zeros() -> ScaledFeatureVector {
        ScaledFeatureVector {
            values: [0.0; FEATURE_DIMENSION],
        }
    }

    #[test]
    fn test_probability_rounded_to_two_places() {
        let engine = InferenceEngine::new(Box::new(FixedModel {
            label: ChurnLabel::Yes,
            probability: 0.8671,
        }));
        let result = engine.predict(&zeros()).unwrap();
        assert_eq!(result.prediction.label, ChurnLabel::Yes);
        assert_eq!(result.prediction.probability, 0.8671);
        assert_eq!(result.prediction.probability_rounded, 0.87);
    }

    #[test]
    fn test_rounding_ties_go_to_even() {
        for (probability, rounded) in [(0.125, 0.12), (0.375, 0.38), (0.5, 0.5)] {
            let engine = InferenceEngine::new(Box::new(FixedModel {
                label: ChurnLabel::No,
                probability,
            }));
            let result = engine.predict(&zeros()).unwrap();
            assert_eq!(result.prediction.probability_rounded, rounded);
        }
    }

    #[test]
    fn test_onnx_prediction_through_engine() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/tiny_classifier.onnx");
        let engine = InferenceEngine::new(Box::new(OnnxModel::load(&path).unwrap()));
        assert_eq!(engine.model_kind(), "onnx");

        // Churn logit is the monthly_charges slot; ln(3) gives p = 0.75
        let mut values = [0.0; FEATURE_DIMENSION];
        values[3] = 3f64.ln();
        let prediction = engine
            .predict(&ScaledFeatureVector { values })
            .unwrap()
            .prediction;
        assert_eq!(prediction.label, ChurnLabel::Yes);
        assert!((prediction.probability - 0.75).abs() < 1e-6);
        assert_eq!(prediction.probability_rounded, 0.75);
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let engine = InferenceEngine::new(Box::new(FixedModel {
            label: ChurnLabel::No,
            probability: 1.5,
        }));
        assert!(matches!(
            engine.predict(&zeros()),
            Err(InferenceError::InvalidProbability(_))
        ));

        let engine = InferenceEngine::new(Box::new(FixedModel {
            label: ChurnLabel::No,
            probability: f64::NAN,
        }));
        assert!(engine.predict(&zeros()).is_err());
    }

    #[test]
    fn test_repeated_predictions_identical() {
        let mut coefficients = [0.1; FEATURE_DIMENSION];
        coefficients[0] = -0.4;
        let engine = InferenceEngine::new(Box::new(LogisticModel {
            coefficients,
            intercept: -0.2,
        }));
        let mut values = [0.5; FEATURE_DIMENSION];
        values[3] = 1.7;
        let features = ScaledFeatureVector { values };

        let first = engine.predict(&features).unwrap().prediction;
        let second = engine.predict(&features).unwrap().prediction;
        assert_eq!(first, second);
        assert_eq!(engine.model_kind(), "logistic");
    }
}
