//! Feature Preparation Pipeline

use crate::encoder::Encoders;
use crate::error::PipelineError;
use crate::features::{DerivedFeatures, FeatureVector, ScaledFeatureVector};
use crate::scaler::Scaler;
use data_validator::{CustomerForm, RawInput, Validator};
use tracing::debug;

/// Everything computed for one submission
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedFeatures {
    /// Parsed input
    pub input: RawInput,
    /// Unscaled features in model order
    pub features: FeatureVector,
    /// Scaled features handed to the model
    pub scaled: ScaledFeatureVector,
}

/// Turn parsed input into the scaled vector the model expects.
///
/// Tenure-derived features are computed first, then categories are encoded,
/// then the assembled vector is scaled as a whole.
pub fn prepare(
    input: &RawInput,
    encoders: &Encoders,
    scaler: &Scaler,
) -> Result<ScaledFeatureVector, PipelineError> {
    let features = assemble(input, encoders)?;
    Ok(scaler.transform(&features))
}

fn assemble(input: &RawInput, encoders: &Encoders) -> Result<FeatureVector, PipelineError> {
    let derived = DerivedFeatures::from_input(input)?;
    debug!(
        "Derived features: avg_monthly={:.4}, lifetime_value={:.4}",
        derived.average_monthly_charges, derived.customer_lifetime_value
    );
    let codes = encoders.encode_all(input)?;
    Ok(FeatureVector::assemble(input, &codes, &derived))
}

/// Immutable pipeline holding the fitted encoders and scaler
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    validator: Validator,
    encoders: Encoders,
    scaler: Scaler,
}

impl FeaturePipeline {
    /// Create a pipeline with the default validator
    pub fn new(encoders: Encoders, scaler: Scaler) -> Self {
        Self {
            validator: Validator::default(),
            encoders,
            scaler,
        }
    }

    /// Replace the form validator
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Scale already-parsed input
    pub fn prepare(&self, input: &RawInput) -> Result<ScaledFeatureVector, PipelineError> {
        prepare(input, &self.encoders, &self.scaler)
    }

    /// Parse a submitted form and run it through the whole pipeline
    pub fn prepare_form(&self, form: &CustomerForm) -> Result<PreparedFeatures, PipelineError> {
        let input = self.validator.validate(form)?;
        let features = assemble(&input, &self.encoders)?;
        let scaled = self.scaler.transform(&features);

        Ok(PreparedFeatures {
            input,
            features,
            scaled,
        })
    }

    /// Fitted encoders
    pub fn encoders(&self) -> &Encoders {
        &self.encoders
    }

    /// Fitted scaler
    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }
}
