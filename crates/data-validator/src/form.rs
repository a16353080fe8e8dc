//! Submitted Form and Parsed Input

use crate::fields::CategoricalField;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Customer attributes exactly as submitted, before any coercion.
///
/// Every field is optional here so that an absent field is reported as a
/// validation error instead of being rejected by the HTTP extractor. JSON
/// numbers are accepted and kept in their textual form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    #[serde(deserialize_with = "string_or_number")]
    pub age: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub contract_type: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub monthly_charges: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub total_charges: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub tech_support: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub internet_service: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub tenure: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub paperless_billing: Option<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub payment_method: Option<String>,
}

impl CustomerForm {
    /// Submitted value of a categorical field
    pub fn category(&self, field: CategoricalField) -> Option<&str> {
        let value = match field {
            CategoricalField::Gender => &self.gender,
            CategoricalField::ContractType => &self.contract_type,
            CategoricalField::TechSupport => &self.tech_support,
            CategoricalField::InternetService => &self.internet_service,
            CategoricalField::PaperlessBilling => &self.paperless_billing,
            CategoricalField::PaymentMethod => &self.payment_method,
        };
        value.as_deref()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FieldVisitor;

    impl<'de> Visitor<'de> for FieldVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(FieldVisitor)
        }
    }

    deserializer.deserialize_any(FieldVisitor)
}

/// Typed customer attributes, parsed once per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// Age in years
    pub age: u32,
    pub gender: String,
    pub contract_type: String,
    /// Current monthly charge
    pub monthly_charges: f64,
    /// Charges accumulated over the whole tenure
    pub total_charges: f64,
    pub tech_support: String,
    pub internet_service: String,
    /// Months as a customer
    pub tenure: u32,
    pub paperless_billing: String,
    pub payment_method: String,
}

impl RawInput {
    /// Value of a categorical field
    pub fn category(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Gender => &self.gender,
            CategoricalField::ContractType => &self.contract_type,
            CategoricalField::TechSupport => &self.tech_support,
            CategoricalField::InternetService => &self.internet_service,
            CategoricalField::PaperlessBilling => &self.paperless_billing,
            CategoricalField::PaymentMethod => &self.payment_method,
        }
    }
}
