//! Categorical Encoding

use crate::error::{EncoderError, PipelineError};
use data_validator::{CategoricalField, RawInput};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Fixed vocabulary for one categorical field.
///
/// A value's code is its position in `classes`, as assigned when the encoder
/// was fitted. Codes are never recomputed.
#[derive(Debug, Clone)]
pub struct CategoryEncoder {
    field: CategoricalField,
    classes: Vec<String>,
    index: HashMap<String, u32>,
}

impl CategoryEncoder {
    /// Build an encoder from its fitted class list
    pub fn new(field: CategoricalField, classes: Vec<String>) -> Result<Self, EncoderError> {
        if classes.is_empty() {
            return Err(EncoderError::EmptyVocabulary(field));
        }

        let mut index = HashMap::with_capacity(classes.len());
        for (code, class) in classes.iter().enumerate() {
            if index.insert(class.clone(), code as u32).is_some() {
                return Err(EncoderError::DuplicateClass {
                    field,
                    value: class.clone(),
                });
            }
        }

        Ok(Self {
            field,
            classes,
            index,
        })
    }

    /// Integer code of a value
    pub fn encode(&self, value: &str) -> Result<u32, PipelineError> {
        self.index
            .get(value)
            .copied()
            .ok_or_else(|| PipelineError::UnknownCategory {
                field: self.field,
                value: value.to_string(),
            })
    }

    /// Value for a code
    pub fn decode(&self, code: u32) -> Option<&str> {
        self.classes.get(code as usize).map(String::as_str)
    }

    /// Field this encoder belongs to
    pub fn field(&self) -> CategoricalField {
        self.field
    }

    /// Vocabulary in code order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// Integer codes for every categorical field of one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedCategories {
    codes: [u32; CategoricalField::COUNT],
}

impl EncodedCategories {
    /// Code assigned to a field
    pub fn code(&self, field: CategoricalField) -> u32 {
        // Variants are declared in feature order
        self.codes[field as usize]
    }
}

/// One encoder per categorical field.
///
/// Deserializes from an object mapping field name to its ordered class list,
/// e.g. `{"gender": ["Female", "Male"], ...}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(
    try_from = "BTreeMap<CategoricalField, Vec<String>>",
    into = "BTreeMap<CategoricalField, Vec<String>>"
)]
pub struct Encoders {
    encoders: BTreeMap<CategoricalField, CategoryEncoder>,
}

impl Encoders {
    /// Encoder for a field
    pub fn get(&self, field: CategoricalField) -> &CategoryEncoder {
        // Construction guarantees every field is present
        &self.encoders[&field]
    }

    /// Encode every categorical field of the input, in feature order
    pub fn encode_all(&self, input: &RawInput) -> Result<EncodedCategories, PipelineError> {
        let mut codes = [0u32; CategoricalField::COUNT];
        for (slot, field) in CategoricalField::ALL.into_iter().enumerate() {
            codes[slot] = self.get(field).encode(input.category(field))?;
        }
        Ok(EncodedCategories { codes })
    }

    /// Iterate encoders in feature order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryEncoder> {
        CategoricalField::ALL.into_iter().map(move |field| self.get(field))
    }
}

impl TryFrom<BTreeMap<CategoricalField, Vec<String>>> for Encoders {
    type Error = EncoderError;

    fn try_from(mut classes: BTreeMap<CategoricalField, Vec<String>>) -> Result<Self, Self::Error> {
        let mut encoders = BTreeMap::new();
        for field in CategoricalField::ALL {
            let vocabulary = classes
                .remove(&field)
                .ok_or(EncoderError::MissingField(field))?;
            encoders.insert(field, CategoryEncoder::new(field, vocabulary)?);
        }
        Ok(Self { encoders })
    }
}

impl From<Encoders> for BTreeMap<CategoricalField, Vec<String>> {
    fn from(encoders: Encoders) -> Self {
        encoders
            .encoders
            .into_iter()
            .map(|(field, encoder)| (field, encoder.classes))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODERS_JSON: &str = r#"{
        "gender": ["Female", "Male"],
        "contract_type": ["Month-to-month", "One year", "Two year"],
        "tech_support": ["No", "No internet service", "Yes"],
        "internet_service": ["DSL", "Fiber optic", "No"],
        "paperless_billing": ["No", "Yes"],
        "payment_method": [
            "Bank transfer (automatic)",
            "Credit card (automatic)",
            "Electronic check",
            "Mailed check"
        ]
    }"#;

    fn sample_input() -> RawInput {
        RawInput {
            age: 30,
            gender: "Male".into(),
            contract_type: "Month-to-month".into(),
            monthly_charges: 70.0,
            total_charges: 700.0,
            tech_support: "No".into(),
            internet_service: "Fiber optic".into(),
            tenure: 10,
            paperless_billing: "Yes".into(),
            payment_method: "Electronic check".into(),
        }
    }

    #[test]
    fn test_codes_follow_class_order() {
        let encoders: Encoders = serde_json::from_str(ENCODERS_JSON).unwrap();
        let codes = encoders.encode_all(&sample_input()).unwrap();

        assert_eq!(codes.code(CategoricalField::Gender), 1);
        assert_eq!(codes.code(CategoricalField::ContractType), 0);
        assert_eq!(codes.code(CategoricalField::TechSupport), 0);
        assert_eq!(codes.code(CategoricalField::InternetService), 1);
        assert_eq!(codes.code(CategoricalField::PaperlessBilling), 1);
        assert_eq!(codes.code(CategoricalField::PaymentMethod), 2);
    }

    #[test]
    fn test_unknown_category() {
        let encoders: Encoders = serde_json::from_str(ENCODERS_JSON).unwrap();
        let input = RawInput {
            internet_service: "Satellite".into(),
            ..sample_input()
        };

        let err = encoders.encode_all(&input).unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnknownCategory {
                field: CategoricalField::InternetService,
                value: "Satellite".into(),
            }
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let encoder = CategoryEncoder::new(
            CategoricalField::Gender,
            vec!["Female".into(), "Male".into()],
        )
        .unwrap();
        assert!(encoder.encode("male").is_err());
        assert_eq!(encoder.decode(0), Some("Female"));
        assert_eq!(encoder.decode(2), None);
    }

    #[test]
    fn test_missing_field_rejected() {
        let err = serde_json::from_str::<Encoders>(r#"{"gender": ["Female", "Male"]}"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("contract_type"), "{}", err);
    }

    #[test]
    fn test_duplicate_and_empty_vocabularies_rejected() {
        assert_eq!(
            CategoryEncoder::new(CategoricalField::Gender, vec![]).unwrap_err(),
            EncoderError::EmptyVocabulary(CategoricalField::Gender)
        );
        assert!(matches!(
            CategoryEncoder::new(
                CategoricalField::Gender,
                vec!["Male".into(), "Male".into()]
            ),
            Err(EncoderError::DuplicateClass { .. })
        ));
    }

    #[test]
    fn test_training_column_names_accepted() {
        let json = ENCODERS_JSON
            .replace("\"gender\"", "\"Gender\"")
            .replace("\"payment_method\"", "\"PaymentMethod\"");
        let encoders: Encoders = serde_json::from_str(&json).unwrap();
        assert_eq!(encoders.get(CategoricalField::PaymentMethod).classes().len(), 4);
    }
}
