//! Raw and Validated User Input

use crate::error::ValidationErrors;
use crate::validator::Validator;
use feature_engine::{normalize_city, DerivedFeatures, FeatureRecord, Occupation};
use serde::{Deserialize, Serialize};

/// Request payload as sent by clients, before any checking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUserInput {
    pub age: i64,
    /// Height in meters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Annual income in lakhs per annum
    pub income_lpa: f64,
    pub city: String,
    pub smoker: bool,
    pub occupation: String,
}

/// Fully validated input with its derived features.
///
/// Only constructed through [`Validator`], so every instance satisfies the
/// field constraints and `derived` always matches the raw fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInput {
    age: u32,
    height: f64,
    weight: f64,
    income_lpa: f64,
    city: String,
    smoker: bool,
    occupation: Occupation,
    #[serde(flatten)]
    derived: DerivedFeatures,
}

impl UserInput {
    /// Validate typed fields against the default constraints
    pub fn new(
        age: i64,
        height: f64,
        weight: f64,
        income_lpa: f64,
        city: &str,
        smoker: bool,
        occupation: &str,
    ) -> Result<Self, ValidationErrors> {
        Validator::default().validate(&RawUserInput {
            age,
            height,
            weight,
            income_lpa,
            city: city.to_string(),
            smoker,
            occupation: occupation.to_string(),
        })
    }

    /// Assemble from already-checked fields, normalizing the city and
    /// deriving features.
    pub(crate) fn from_checked(
        age: u32,
        height: f64,
        weight: f64,
        income_lpa: f64,
        city: &str,
        smoker: bool,
        occupation: Occupation,
    ) -> Self {
        let city = normalize_city(city);
        let derived = DerivedFeatures::derive(age, height, weight, smoker, &city);
        Self {
            age,
            height,
            weight,
            income_lpa,
            city,
            smoker,
            occupation,
            derived,
        }
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn income_lpa(&self) -> f64 {
        self.income_lpa
    }

    /// Normalized (trimmed, title-cased) city
    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn smoker(&self) -> bool {
        self.smoker
    }

    pub fn occupation(&self) -> Occupation {
        self.occupation
    }

    pub fn derived(&self) -> &DerivedFeatures {
        &self.derived
    }

    /// Six-column projection passed to the classifier
    pub fn to_feature_record(&self) -> FeatureRecord {
        FeatureRecord::new(&self.derived, self.occupation, self.income_lpa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feature_engine::{AgeGroup, CityTier, LifestyleRisk};

    #[test]
    fn test_example_profile() {
        let input = UserInput::new(29, 1.75, 85.0, 12.0, " pune ", true, "private_job").unwrap();

        assert_eq!(input.city(), "Pune");
        assert_eq!(input.occupation(), Occupation::PrivateJob);

        let derived = input.derived();
        assert!((derived.bmi - 27.76).abs() < 0.01);
        assert_eq!(derived.lifestyle_risk, LifestyleRisk::Medium);
        assert_eq!(derived.age_group, AgeGroup::Adult);
        assert_eq!(derived.city_category, CityTier::Tier1);

        let record = input.to_feature_record();
        assert_eq!(record.bmi, derived.bmi);
        assert_eq!(record.income_lpa, 12.0);
        assert_eq!(record.occupation, Occupation::PrivateJob);
    }

    #[test]
    fn test_rejects_before_deriving() {
        // height 0 would divide by zero if derivation ran
        let err = UserInput::new(30, 0.0, 70.0, 5.0, "Delhi", false, "student").unwrap_err();
        assert!(err.has_field("height"));
    }

    #[test]
    fn test_serializes_flat_with_derived_fields() {
        let input = UserInput::new(61, 1.6, 80.0, 3.0, "jaipur", true, "retired").unwrap();
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["city"], "Jaipur");
        assert_eq!(json["age_group"], "Senior");
        assert_eq!(json["city_category"], 2);
        assert_eq!(json["lifestyle_risk"], "High");
    }
}
