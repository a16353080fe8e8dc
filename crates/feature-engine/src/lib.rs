//! Feature Preparation Engine
//!
//! Converts parsed customer input into the fixed-order, scaled feature vector
//! the churn model was trained on.

mod encoder;
mod error;
mod features;
mod pipeline;
mod scaler;

pub use data_validator::{
    CategoricalField, CustomerForm, RawInput, ValidationConfig, ValidationError, Validator,
};
pub use encoder::{CategoryEncoder, EncodedCategories, Encoders};
pub use error::{EncoderError, PipelineError, ScalerError};
pub use features::{
    DerivedFeatures, FeatureVector, ScaledFeatureVector, FEATURE_DIMENSION, FEATURE_NAMES,
};
pub use pipeline::{prepare, FeaturePipeline, PreparedFeatures};
pub use scaler::Scaler;
