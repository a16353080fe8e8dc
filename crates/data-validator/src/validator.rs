//! Form Validator for Type Coercion and Range Checking

use crate::error::ValidationError;
use crate::fields::CategoricalField;
use crate::form::{CustomerForm, RawInput};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Age valid range (years)
    pub age_range: (f64, f64),
    /// Tenure valid range (months)
    pub tenure_range: (f64, f64),
    /// Monthly and total charges valid range
    pub charges_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            age_range: (0.0, u32::MAX as f64),
            tenure_range: (0.0, u32::MAX as f64),
            charges_range: (0.0, f64::MAX),
        }
    }
}

/// Validator that coerces a [`CustomerForm`] into a [`RawInput`]
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Parse every field of the form, failing on the first invalid one.
    ///
    /// Fields are checked in submission order. Tenure may be zero here;
    /// rejecting it is left to feature derivation.
    pub fn validate(&self, form: &CustomerForm) -> Result<RawInput, ValidationError> {
        let input = RawInput {
            age: self.parse_whole("age", form.age.as_deref(), self.config.age_range)?,
            gender: Self::parse_category(form, CategoricalField::Gender)?,
            contract_type: Self::parse_category(form, CategoricalField::ContractType)?,
            monthly_charges: self.parse_real(
                "monthly_charges",
                form.monthly_charges.as_deref(),
                self.config.charges_range,
            )?,
            total_charges: self.parse_real(
                "total_charges",
                form.total_charges.as_deref(),
                self.config.charges_range,
            )?,
            tech_support: Self::parse_category(form, CategoricalField::TechSupport)?,
            internet_service: Self::parse_category(form, CategoricalField::InternetService)?,
            tenure: self.parse_whole("tenure", form.tenure.as_deref(), self.config.tenure_range)?,
            paperless_billing: Self::parse_category(form, CategoricalField::PaperlessBilling)?,
            payment_method: Self::parse_category(form, CategoricalField::PaymentMethod)?,
        };

        debug!(
            "Validated form: age={}, tenure={}, monthly={}, total={}",
            input.age, input.tenure, input.monthly_charges, input.total_charges
        );
        Ok(input)
    }

    /// Validate a single value against a range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Parse a non-negative whole number
    fn parse_whole(
        &self,
        field: &'static str,
        raw: Option<&str>,
        range: (f64, f64),
    ) -> Result<u32, ValidationError> {
        let text = Self::required(field, raw)?;
        let value: i64 = text.parse().map_err(|_| ValidationError::InvalidFormat {
            field,
            value: text.to_string(),
            expected: "a whole number",
        })?;

        self.validate_range(field, value as f64, range)?;
        u32::try_from(value).map_err(|_| ValidationError::OutOfRange {
            field,
            value: value as f64,
            min: 0.0,
            max: u32::MAX as f64,
        })
    }

    /// Parse a finite real number
    fn parse_real(
        &self,
        field: &'static str,
        raw: Option<&str>,
        range: (f64, f64),
    ) -> Result<f64, ValidationError> {
        let text = Self::required(field, raw)?;
        let value = text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ValidationError::InvalidFormat {
                field,
                value: text.to_string(),
                expected: "a number",
            })?;

        self.validate_range(field, value, range)?;
        Ok(value)
    }

    fn parse_category(
        form: &CustomerForm,
        field: CategoricalField,
    ) -> Result<String, ValidationError> {
        Self::required(field.as_str(), form.category(field)).map(str::to_string)
    }

    fn required<'a>(field: &'static str, raw: Option<&'a str>) -> Result<&'a str, ValidationError> {
        match raw.map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(ValidationError::MissingField(field)),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
