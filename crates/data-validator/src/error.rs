//! Validation Error Types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Broad class of a field failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Required field absent
    Missing,
    /// Field present but of the wrong JSON type
    TypeError,
    /// Field well-typed but outside its allowed values
    ValueError,
    /// Body could not be parsed as JSON at all
    InvalidJson,
}

/// A single failure, located by its path in the request
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{}: {msg}", .loc.join("."))]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
}

impl FieldError {
    /// Error on a top-level body field
    pub fn field(name: &str, msg: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            loc: vec!["body".to_string(), name.to_string()],
            msg: msg.into(),
            kind,
        }
    }

    /// Error on the request body as a whole
    pub fn body(msg: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            loc: vec!["body".to_string()],
            msg: msg.into(),
            kind,
        }
    }

    pub fn missing(name: &str) -> Self {
        Self::field(name, "field required", ErrorKind::Missing)
    }

    pub fn expected(name: &str, type_name: &str) -> Self {
        Self::field(name, format!("expected {}", type_name), ErrorKind::TypeError)
    }

    pub fn out_of_range(name: &str, label: &str) -> Self {
        Self::field(name, format!("{} out of range", label), ErrorKind::ValueError)
    }

    /// Last path segment, i.e. the field name
    pub fn field_name(&self) -> &str {
        self.loc.last().map(String::as_str).unwrap_or("body")
    }
}

/// Every failure found in one request
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Whether any failure is reported for `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field_name() == field)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<FieldError> for ValidationErrors {
    fn from(error: FieldError) -> Self {
        Self::new(vec![error])
    }
}

impl std::error::Error for ValidationErrors {}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_display() {
        let error = FieldError::out_of_range("age", "age");
        assert_eq!(error.to_string(), "body.age: age out of range");
        assert_eq!(error.field_name(), "age");
    }

    #[test]
    fn test_wire_shape() {
        let error = FieldError::missing("city");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json, serde_json::json!({
            "loc": ["body", "city"],
            "msg": "field required",
            "type": "missing"
        }));
    }

    #[test]
    fn test_collection_display() {
        let errors = ValidationErrors::new(vec![
            FieldError::out_of_range("age", "age"),
            FieldError::expected("smoker", "boolean"),
        ]);
        assert_eq!(
            errors.to_string(),
            "2 validation error(s); body.age: age out of range; body.smoker: expected boolean"
        );
        assert!(errors.has_field("smoker"));
        assert!(!errors.has_field("city"));
    }
}
