//! Field Validator for User Attributes

use crate::error::{ErrorKind, FieldError, ValidationErrors};
use crate::input::{RawUserInput, UserInput};
use feature_engine::Occupation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Exclusive upper bounds for the bounded fields. Every numeric field also
/// has an exclusive lower bound of zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Ages must be below this (years)
    pub max_age: i64,
    /// Heights must be below this (meters)
    pub max_height_m: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_age: 120,
            max_height_m: 2.5,
        }
    }
}

/// Validator for prediction requests
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a typed payload
    pub fn validate(&self, raw: &RawUserInput) -> Result<UserInput, ValidationErrors> {
        let mut errors = Vec::new();

        let age = collect(self.check_age(raw.age), &mut errors);
        let height = collect(self.check_height(raw.height), &mut errors);
        let weight = collect(check_positive("weight", "weight", raw.weight), &mut errors);
        let income = collect(check_positive("income_lpa", "income", raw.income_lpa), &mut errors);
        let occupation = collect(check_occupation(&raw.occupation), &mut errors);

        match (age, height, weight, income, occupation) {
            (Some(age), Some(height), Some(weight), Some(income), Some(occupation))
                if errors.is_empty() =>
            {
                Ok(UserInput::from_checked(
                    age,
                    height,
                    weight,
                    income,
                    &raw.city,
                    raw.smoker,
                    occupation,
                ))
            }
            _ => Err(reject(errors)),
        }
    }

    /// Validate an untyped JSON body, reporting every bad field at once
    pub fn validate_json(&self, body: &Value) -> Result<UserInput, ValidationErrors> {
        let Some(map) = body.as_object() else {
            return Err(reject(vec![FieldError::body(
                "expected a JSON object",
                ErrorKind::TypeError,
            )]));
        };

        let mut errors = Vec::new();

        let age = collect(
            required(map, "age")
                .and_then(|v| as_integer("age", v))
                .and_then(|v| self.check_age(v)),
            &mut errors,
        );
        let height = collect(
            required(map, "height")
                .and_then(|v| as_number("height", v))
                .and_then(|v| self.check_height(v)),
            &mut errors,
        );
        let weight = collect(
            required(map, "weight")
                .and_then(|v| as_number("weight", v))
                .and_then(|v| check_positive("weight", "weight", v)),
            &mut errors,
        );
        let income = collect(
            required(map, "income_lpa")
                .and_then(|v| as_number("income_lpa", v))
                .and_then(|v| check_positive("income_lpa", "income", v)),
            &mut errors,
        );
        let city = collect(
            required(map, "city").and_then(|v| as_string("city", v)),
            &mut errors,
        );
        let smoker = collect(
            required(map, "smoker").and_then(|v| as_bool("smoker", v)),
            &mut errors,
        );
        let occupation = collect(
            required(map, "occupation").and_then(|v| match v.as_str() {
                Some(s) => check_occupation(s),
                None => Err(invalid_occupation()),
            }),
            &mut errors,
        );

        match (age, height, weight, income, city, smoker, occupation) {
            (
                Some(age),
                Some(height),
                Some(weight),
                Some(income),
                Some(city),
                Some(smoker),
                Some(occupation),
            ) if errors.is_empty() => Ok(UserInput::from_checked(
                age, height, weight, income, city, smoker, occupation,
            )),
            _ => Err(reject(errors)),
        }
    }

    /// 0 < age < max_age
    pub fn check_age(&self, age: i64) -> Result<u32, FieldError> {
        if age > 0 && age < self.config.max_age {
            u32::try_from(age).map_err(|_| FieldError::out_of_range("age", "age"))
        } else {
            Err(FieldError::out_of_range("age", "age"))
        }
    }

    /// 0 < height < max_height_m
    pub fn check_height(&self, height: f64) -> Result<f64, FieldError> {
        if height > 0.0 && height < self.config.max_height_m {
            Ok(height)
        } else {
            Err(FieldError::out_of_range("height", "height"))
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

fn reject(errors: Vec<FieldError>) -> ValidationErrors {
    debug!(count = errors.len(), "rejected user input");
    ValidationErrors::new(errors)
}

fn collect<T>(result: Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn check_positive(field: &str, label: &str, value: f64) -> Result<f64, FieldError> {
    // NaN fails the comparison and is rejected too
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(FieldError::out_of_range(field, label))
    }
}

fn check_occupation(value: &str) -> Result<Occupation, FieldError> {
    value.parse().map_err(|_| invalid_occupation())
}

fn invalid_occupation() -> FieldError {
    FieldError::field("occupation", "invalid occupation", ErrorKind::ValueError)
}

fn required<'a>(map: &'a Map<String, Value>, field: &str) -> Result<&'a Value, FieldError> {
    match map.get(field) {
        Some(Value::Null) | None => Err(FieldError::missing(field)),
        Some(value) => Ok(value),
    }
}

/// Integers, or floats without a fractional part
fn as_integer(field: &str, value: &Value) -> Result<i64, FieldError> {
    let Value::Number(n) = value else {
        return Err(FieldError::expected(field, "integer"));
    };
    if let Some(i) = n.as_i64() {
        Ok(i)
    } else if n.as_u64().is_some() {
        // Above i64::MAX, certainly out of range
        Ok(i64::MAX)
    } else {
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 => Ok(f as i64),
            _ => Err(FieldError::expected(field, "integer")),
        }
    }
}

fn as_number(field: &str, value: &Value) -> Result<f64, FieldError> {
    value
        .as_f64()
        .ok_or_else(|| FieldError::expected(field, "number"))
}

fn as_string<'a>(field: &str, value: &'a Value) -> Result<&'a str, FieldError> {
    value
        .as_str()
        .ok_or_else(|| FieldError::expected(field, "string"))
}

fn as_bool(field: &str, value: &Value) -> Result<bool, FieldError> {
    value
        .as_bool()
        .ok_or_else(|| FieldError::expected(field, "boolean"))
}
