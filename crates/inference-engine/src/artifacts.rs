//! Artifact Loading
//!
//! The model, scaler and encoders are produced by the training job and read
//! once at startup. Any failure here is fatal: the server must not come up
//! with a partial set of artifacts.

use crate::model::{Classifier, LogisticModel, OnnxModel};
use feature_engine::{Encoders, Scaler};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors while loading artifacts
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid artifact {}: {message}", path.display())]
    Invalid { path: PathBuf, message: String },
    #[error("Failed to load ONNX model {}: {message}", path.display())]
    Onnx { path: PathBuf, message: String },
}

/// Locations of the three fitted artifacts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    /// Classifier; `.onnx` files run through tract, anything else is read as
    /// a JSON logistic model
    pub model_path: PathBuf,
    /// JSON scaler parameters
    pub scaler_path: PathBuf,
    /// JSON category vocabularies
    pub encoders_path: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("artifacts/churn_model.json"),
            scaler_path: PathBuf::from("artifacts/scaler.json"),
            encoders_path: PathBuf::from("artifacts/label_encoders.json"),
        }
    }
}

/// Everything needed to serve predictions
#[derive(Debug)]
pub struct ModelArtifacts {
    pub model: Box<dyn Classifier>,
    pub scaler: Scaler,
    pub encoders: Encoders,
}

impl ModelArtifacts {
    /// Load and validate all artifacts
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactLoadError> {
        let model = Self::load_model(&paths.model_path)?;

        let scaler: Scaler = read_json(&paths.scaler_path)?;
        scaler.validate().map_err(|e| ArtifactLoadError::Invalid {
            path: paths.scaler_path.clone(),
            message: e.to_string(),
        })?;
        info!(
            "Loaded {} scaler from {}",
            scaler.method(),
            paths.scaler_path.display()
        );

        let encoders: Encoders = read_json(&paths.encoders_path)?;
        info!("Loaded encoders from {}", paths.encoders_path.display());

        Ok(Self {
            model,
            scaler,
            encoders,
        })
    }

    fn load_model(path: &Path) -> Result<Box<dyn Classifier>, ArtifactLoadError> {
        let is_onnx = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("onnx"));

        if is_onnx {
            let model = OnnxModel::load(path).map_err(|e| ArtifactLoadError::Onnx {
                path: path.to_path_buf(),
                message: format!("{e:#}"),
            })?;
            return Ok(Box::new(model));
        }

        let model: LogisticModel = read_json(path)?;
        if !model.is_finite() {
            return Err(ArtifactLoadError::Invalid {
                path: path.to_path_buf(),
                message: "model parameters must be finite".to_string(),
            });
        }
        info!("Loaded logistic model from {}", path.display());
        Ok(Box::new(model))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ArtifactLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{CategoricalField, FEATURE_DIMENSION};
    use std::fs;
    use tempfile::TempDir;

    const ENCODERS: &str = r#"{
        "gender": ["Female", "Male"],
        "contract_type": ["Month-to-month", "One year", "Two year"],
        "tech_support": ["No", "Yes"],
        "internet_service": ["DSL", "Fiber optic", "No"],
        "paperless_billing": ["No", "Yes"],
        "payment_method": ["Credit card", "Electronic check", "Mailed check"]
    }"#;

    fn write_artifacts(dir: &TempDir, model: &str, scaler: &str) -> ArtifactPaths {
        let paths = ArtifactPaths {
            model_path: dir.path().join("model.json"),
            scaler_path: dir.path().join("scaler.json"),
            encoders_path: dir.path().join("encoders.json"),
        };
        fs::write(&paths.model_path, model).unwrap();
        fs::write(&paths.scaler_path, scaler).unwrap();
        fs::write(&paths.encoders_path, ENCODERS).unwrap();
        paths
    }

    fn model_json() -> String {
        serde_json::to_string(&LogisticModel {
            coefficients: [0.25; FEATURE_DIMENSION],
            intercept: -1.0,
        })
        .unwrap()
    }

    #[test]
    fn test_load_valid_artifacts() {
        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(&dir, &model_json(), r#"{"method": "identity"}"#);

        let artifacts = ModelArtifacts::load(&paths).unwrap();
        assert_eq!(artifacts.model.kind(), "logistic");
        assert_eq!(artifacts.scaler, Scaler::Identity);
        assert_eq!(
            artifacts.encoders.get(CategoricalField::TechSupport).classes(),
            ["No", "Yes"]
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut paths = write_artifacts(&dir, &model_json(), r#"{"method": "identity"}"#);
        paths.encoders_path = dir.path().join("absent.json");

        let err = ModelArtifacts::load(&paths).unwrap_err();
        assert!(matches!(err, ArtifactLoadError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn test_malformed_model() {
        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(&dir, r#"{"coefficients": [1.0]}"#, r#"{"method": "identity"}"#);
        assert!(matches!(
            ModelArtifacts::load(&paths),
            Err(ArtifactLoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let dir = TempDir::new().unwrap();
        let scaler = serde_json::to_string(&Scaler::Standard {
            mean: [0.0; FEATURE_DIMENSION],
            scale: [0.0; FEATURE_DIMENSION],
        })
        .unwrap();
        let paths = write_artifacts(&dir, &model_json(), &scaler);
        assert!(matches!(
            ModelArtifacts::load(&paths),
            Err(ArtifactLoadError::Invalid { .. })
        ));
    }

    #[test]
    fn test_unreadable_onnx_model() {
        let dir = TempDir::new().unwrap();
        let mut paths = write_artifacts(&dir, &model_json(), r#"{"method": "identity"}"#);
        paths.model_path = dir.path().join("model.onnx");
        fs::write(&paths.model_path, b"not a protobuf").unwrap();

        assert!(matches!(
            ModelArtifacts::load(&paths),
            Err(ArtifactLoadError::Onnx { .. })
        ));
    }

    #[test]
    fn test_onnx_model_selected_by_extension() {
        let dir = TempDir::new().unwrap();
        let mut paths = write_artifacts(&dir, &model_json(), r#"{"method": "identity"}"#);
        paths.model_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/tiny_classifier.onnx");

        let artifacts = ModelArtifacts::load(&paths).unwrap();
        assert_eq!(artifacts.model.kind(), "onnx");
    }

    #[test]
    fn test_bundled_artifacts_load() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        let defaults = ArtifactPaths::default();
        let paths = ArtifactPaths {
            model_path: root.join(&defaults.model_path),
            scaler_path: root.join(&defaults.scaler_path),
            encoders_path: root.join(&defaults.encoders_path),
        };

        let artifacts = ModelArtifacts::load(&paths).unwrap();
        assert_eq!(artifacts.scaler.method(), "standard");
        assert_eq!(
            artifacts.encoders.iter().count(),
            CategoricalField::ALL.len()
        );
    }
}
