//! Customer Input Validation
//!
//! Turns the raw string fields of a submitted form into a typed [`RawInput`],
//! with type coercion and range checking for every numeric field.

mod error;
mod fields;
mod form;
mod validator;

pub use error::ValidationError;
pub use fields::CategoricalField;
pub use form::{CustomerForm, RawInput};
pub use validator::{ValidationConfig, Validator};
