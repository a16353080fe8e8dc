//! Feature Scaling

use crate::error::ScalerError;
use crate::features::{FeatureVector, ScaledFeatureVector, FEATURE_DIMENSION};
use serde::{Deserialize, Serialize};

/// Per-feature affine transform with parameters fixed at training time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Scaler {
    /// Z-score: `(x - mean) / scale`
    Standard {
        mean: [f64; FEATURE_DIMENSION],
        scale: [f64; FEATURE_DIMENSION],
    },
    /// Min-max: `x * scale + min`, with `min` already offset by the fitted minimum
    MinMax {
        min: [f64; FEATURE_DIMENSION],
        scale: [f64; FEATURE_DIMENSION],
    },
    /// Pass-through
    Identity,
}

impl Scaler {
    /// Check that every parameter is usable
    pub fn validate(&self) -> Result<(), ScalerError> {
        match self {
            Scaler::Standard { mean, scale } => {
                Self::check_finite("mean", mean)?;
                Self::check_finite("scale", scale)?;
                match scale.iter().position(|&s| s == 0.0) {
                    Some(index) => Err(ScalerError::ZeroScale(index)),
                    None => Ok(()),
                }
            }
            Scaler::MinMax { min, scale } => {
                Self::check_finite("min", min)?;
                Self::check_finite("scale", scale)
            }
            Scaler::Identity => Ok(()),
        }
    }

    /// Apply the transform to every feature
    pub fn transform(&self, features: &FeatureVector) -> ScaledFeatureVector {
        let mut values = features.values;
        match self {
            Scaler::Standard { mean, scale } => {
                for (i, v) in values.iter_mut().enumerate() {
                    *v = (*v - mean[i]) / scale[i];
                }
            }
            Scaler::MinMax { min, scale } => {
                for (i, v) in values.iter_mut().enumerate() {
                    *v = *v * scale[i] + min[i];
                }
            }
            Scaler::Identity => {}
        }
        ScaledFeatureVector { values }
    }

    /// Method name
    pub fn method(&self) -> &'static str {
        match self {
            Scaler::Standard { .. } => "standard",
            Scaler::MinMax { .. } => "min_max",
            Scaler::Identity => "identity",
        }
    }

    fn check_finite(param: &'static str, values: &[f64]) -> Result<(), ScalerError> {
        match values.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(ScalerError::NonFinite { param, index }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> FeatureVector {
        let mut values = [0.0; FEATURE_DIMENSION];
        for (i, v) in values.iter_mut().enumerate() {
            *v = i as f64;
        }
        FeatureVector { values }
    }

    #[test]
    fn test_standard_scaling() {
        let scaler = Scaler::Standard {
            mean: [1.0; FEATURE_DIMENSION],
            scale: [2.0; FEATURE_DIMENSION],
        };
        let scaled = scaler.transform(&ramp());
        assert_eq!(scaled.values[0], -0.5);
        assert_eq!(scaled.values[1], 0.0);
        assert_eq!(scaled.values[11], 5.0);
    }

    #[test]
    fn test_min_max_scaling() {
        let scaler = Scaler::MinMax {
            min: [-0.5; FEATURE_DIMENSION],
            scale: [0.5; FEATURE_DIMENSION],
        };
        let scaled = scaler.transform(&ramp());
        assert_eq!(scaled.values[1], 0.0);
        assert_eq!(scaled.values[3], 1.0);
    }

    #[test]
    fn test_identity() {
        let features = ramp();
        assert_eq!(Scaler::Identity.transform(&features).values, features.values);
    }

    #[test]
    fn test_validation() {
        let mut scale = [1.0; FEATURE_DIMENSION];
        scale[4] = 0.0;
        let scaler = Scaler::Standard {
            mean: [0.0; FEATURE_DIMENSION],
            scale,
        };
        assert_eq!(scaler.validate(), Err(ScalerError::ZeroScale(4)));

        let mut min = [0.0; FEATURE_DIMENSION];
        min[7] = f64::NAN;
        let scaler = Scaler::MinMax {
            min,
            scale: [1.0; FEATURE_DIMENSION],
        };
        assert_eq!(
            scaler.validate(),
            Err(ScalerError::NonFinite { param: "min", index: 7 })
        );
    }

    #[test]
    fn test_deserialize_tagged() {
        let json = r#"{"method": "standard", "mean": [0,0,0,0,0,0,0,0,0,0,0,0],
                       "scale": [1,1,1,1,1,1,1,1,1,1,1,1]}"#;
        let scaler: Scaler = serde_json::from_str(json).unwrap();
        assert_eq!(scaler.method(), "standard");
        assert!(scaler.validate().is_ok());

        let short = r#"{"method": "standard", "mean": [0], "scale": [1]}"#;
        assert!(serde_json::from_str::<Scaler>(short).is_err());
    }
}
