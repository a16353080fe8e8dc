//! Categorical Field Names

use serde::{Deserialize, Serialize};
use std::fmt;

/// A categorical input field, encoded to an integer code before inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    #[serde(alias = "Gender")]
    Gender,
    #[serde(alias = "ContractType")]
    ContractType,
    #[serde(alias = "TechSupport")]
    TechSupport,
    #[serde(alias = "InternetService")]
    InternetService,
    #[serde(alias = "PaperlessBilling")]
    PaperlessBilling,
    #[serde(alias = "PaymentMethod")]
    PaymentMethod,
}

impl CategoricalField {
    /// Number of categorical fields
    pub const COUNT: usize = 6;

    /// All categorical fields, in the order they appear in the feature vector
    pub const ALL: [CategoricalField; Self::COUNT] = [
        CategoricalField::Gender,
        CategoricalField::ContractType,
        CategoricalField::TechSupport,
        CategoricalField::InternetService,
        CategoricalField::PaperlessBilling,
        CategoricalField::PaymentMethod,
    ];

    /// Form field name
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoricalField::Gender => "gender",
            CategoricalField::ContractType => "contract_type",
            CategoricalField::TechSupport => "tech_support",
            CategoricalField::InternetService => "internet_service",
            CategoricalField::PaperlessBilling => "paperless_billing",
            CategoricalField::PaymentMethod => "payment_method",
        }
    }

    /// Human readable label for forms and messages
    pub fn label(&self) -> &'static str {
        match self {
            CategoricalField::Gender => "Gender",
            CategoricalField::ContractType => "Contract Type",
            CategoricalField::TechSupport => "Tech Support",
            CategoricalField::InternetService => "Internet Service",
            CategoricalField::PaperlessBilling => "Paperless Billing",
            CategoricalField::PaymentMethod => "Payment Method",
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
