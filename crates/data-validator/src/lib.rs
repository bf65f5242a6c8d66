//! Data Validation and Normalization
//!
//! Validates raw user attributes field by field, normalizes the city name and
//! eagerly derives the engineered features once every field has passed.

mod error;
mod input;
mod validator;

pub use error::{ErrorKind, FieldError, ValidationErrors};
pub use input::{RawUserInput, UserInput};
pub use validator::{ValidationConfig, Validator};
