//! Feature Vector Assembly

use crate::encoder::EncodedCategories;
use crate::error::PipelineError;
use data_validator::{CategoricalField, RawInput};
use serde::{Deserialize, Serialize};

/// Number of features the model was trained on
pub const FEATURE_DIMENSION: usize = 12;

/// Feature names in training-time column order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "age",
    "gender",
    "contract_type",
    "monthly_charges",
    "total_charges",
    "tech_support",
    "internet_service",
    "tenure",
    "paperless_billing",
    "payment_method",
    "average_monthly_charges",
    "customer_lifetime_value",
];

/// Features computed from the submitted values rather than submitted directly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    /// `total_charges / tenure`
    pub average_monthly_charges: f64,
    /// `monthly_charges * tenure`
    pub customer_lifetime_value: f64,
}

impl DerivedFeatures {
    /// Derive from already-parsed input
    pub fn from_input(input: &RawInput) -> Result<Self, PipelineError> {
        Self::compute(input.monthly_charges, input.total_charges, input.tenure)
    }

    /// Derive from the raw numeric values
    pub fn compute(
        monthly_charges: f64,
        total_charges: f64,
        tenure: u32,
    ) -> Result<Self, PipelineError> {
        if tenure == 0 {
            return Err(PipelineError::DivisionByZero);
        }

        let tenure = f64::from(tenure);
        Ok(Self {
            average_monthly_charges: total_charges / tenure,
            customer_lifetime_value: monthly_charges * tenure,
        })
    }
}

/// Unscaled feature vector in training-time order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: [f64; FEATURE_DIMENSION],
}

impl FeatureVector {
    /// Lay out input, category codes and derived features in model order
    pub fn assemble(
        input: &RawInput,
        codes: &EncodedCategories,
        derived: &DerivedFeatures,
    ) -> Self {
        let code = |field: CategoricalField| f64::from(codes.code(field));

        Self {
            values: [
                f64::from(input.age),
                code(CategoricalField::Gender),
                code(CategoricalField::ContractType),
                input.monthly_charges,
                input.total_charges,
                code(CategoricalField::TechSupport),
                code(CategoricalField::InternetService),
                f64::from(input.tenure),
                code(CategoricalField::PaperlessBilling),
                code(CategoricalField::PaymentMethod),
                derived.average_monthly_charges,
                derived.customer_lifetime_value,
            ],
        }
    }

    /// Value of a named feature
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|idx| self.values[idx])
    }

    /// `(name, value)` pairs in model order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.into_iter().zip(self.values.iter().copied())
    }
}

/// Feature vector after the scaler transform, ready for inference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledFeatureVector {
    pub values: [f64; FEATURE_DIMENSION],
}

impl ScaledFeatureVector {
    /// Values as a slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Values narrowed to `f32` for runtimes that take single precision
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_derived_features() {
        let derived = DerivedFeatures::compute(70.0, 700.0, 10).unwrap();
        assert_eq!(derived.average_monthly_charges, 70.0);
        assert_eq!(derived.customer_lifetime_value, 700.0);
    }

    #[test]
    fn test_zero_tenure() {
        assert_eq!(
            DerivedFeatures::compute(70.0, 700.0, 0),
            Err(PipelineError::DivisionByZero)
        );
    }

    #[test]
    fn test_feature_names_unique() {
        for (i, a) in FEATURE_NAMES.iter().enumerate() {
            for b in &FEATURE_NAMES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_derived_features_exact(
            monthly in 0.0f64..10_000.0,
            total in 0.0f64..1_000_000.0,
            tenure in 1u32..1200,
        ) {
            let derived = DerivedFeatures::compute(monthly, total, tenure).unwrap();
            prop_assert_eq!(derived.average_monthly_charges, total / tenure as f64);
            prop_assert_eq!(derived.customer_lifetime_value, monthly * tenure as f64);
        }
    }
}
