//! Derived Features and Model Feature Record

use crate::city::{city_tier, CityTier};
use crate::occupation::Occupation;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// BMI above which a person counts as obese
pub const OBESITY_BMI: f64 = 30.0;

/// Lifestyle risk tier derived from smoking and BMI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifestyleRisk {
    Low,
    Medium,
    High,
}

impl LifestyleRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifestyleRisk::Low => "Low",
            LifestyleRisk::Medium => "Medium",
            LifestyleRisk::High => "High",
        }
    }
}

/// Age bracket; each band includes its lower bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    /// age < 25
    Young,
    /// 25 <= age < 45
    Adult,
    /// 45 <= age < 60
    #[serde(rename = "Middle_aged")]
    MiddleAged,
    /// age >= 60
    Senior,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Young => "Young",
            AgeGroup::Adult => "Adult",
            AgeGroup::MiddleAged => "Middle_aged",
            AgeGroup::Senior => "Senior",
        }
    }
}

/// Body mass index, `weight / height²`, unrounded
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    weight_kg / (height_m * height_m)
}

/// Lifestyle risk: both factors is High, exactly one is Medium
pub fn lifestyle_risk(smoker: bool, bmi: f64) -> LifestyleRisk {
    let obese = bmi > OBESITY_BMI;
    match (smoker, obese) {
        (true, true) => LifestyleRisk::High,
        (true, false) | (false, true) => LifestyleRisk::Medium,
        (false, false) => LifestyleRisk::Low,
    }
}

pub fn age_group(age: u32) -> AgeGroup {
    match age {
        0..=24 => AgeGroup::Young,
        25..=44 => AgeGroup::Adult,
        45..=59 => AgeGroup::MiddleAged,
        _ => AgeGroup::Senior,
    }
}

/// Engineered features, computed once from validated input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    pub bmi: f64,
    pub lifestyle_risk: LifestyleRisk,
    pub age_group: AgeGroup,
    pub city_category: CityTier,
}

impl DerivedFeatures {
    /// Derive all features. Inputs must already be range-checked and `city`
    /// already normalized.
    pub fn derive(age: u32, height_m: f64, weight_kg: f64, smoker: bool, city: &str) -> Self {
        let bmi = bmi(weight_kg, height_m);
        let features = Self {
            bmi,
            lifestyle_risk: lifestyle_risk(smoker, bmi),
            age_group: age_group(age),
            city_category: city_tier(city),
        };
        trace!(?features, "derived features");
        features
    }
}

/// A single feature column value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Number(f64),
    Category(&'static str),
}

impl FeatureValue {
    /// Key used when matching against a category list. Integral numbers
    /// render without a fractional part, so tier 1 matches `"1"`.
    pub fn category_key(&self) -> String {
        match self {
            FeatureValue::Category(s) => (*s).to_string(),
            FeatureValue::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{}", *n as i64),
            FeatureValue::Number(n) => n.to_string(),
        }
    }
}

/// The six columns the classifier consumes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub bmi: f64,
    pub age_group: AgeGroup,
    pub lifestyle_risk: LifestyleRisk,
    pub city_category: CityTier,
    pub occupation: Occupation,
    pub income_lpa: f64,
}

impl FeatureRecord {
    /// Column names, in model order
    pub const FEATURE_NAMES: [&'static str; 6] = [
        "bmi",
        "age_group",
        "lifestyle_risk",
        "city_category",
        "occupation",
        "income_lpa",
    ];

    pub fn new(derived: &DerivedFeatures, occupation: Occupation, income_lpa: f64) -> Self {
        Self {
            bmi: derived.bmi,
            age_group: derived.age_group,
            lifestyle_risk: derived.lifestyle_risk,
            city_category: derived.city_category,
            occupation,
            income_lpa,
        }
    }

    /// Look up a column by name
    pub fn get(&self, name: &str) -> Option<FeatureValue> {
        let value = match name {
            "bmi" => FeatureValue::Number(self.bmi),
            "age_group" => FeatureValue::Category(self.age_group.as_str()),
            "lifestyle_risk" => FeatureValue::Category(self.lifestyle_risk.as_str()),
            "city_category" => FeatureValue::Number(f64::from(self.city_category.as_u8())),
            "occupation" => FeatureValue::Category(self.occupation.as_str()),
            "income_lpa" => FeatureValue::Number(self.income_lpa),
            _ => return None,
        };
        Some(value)
    }

    /// All columns with their names, in model order
    pub fn columns(&self) -> impl Iterator<Item = (&'static str, FeatureValue)> + '_ {
        Self::FEATURE_NAMES
            .iter()
            .filter_map(move |name| self.get(name).map(|value| (*name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bmi() {
        let value = bmi(85.0, 1.75);
        assert!((value - 27.755_102).abs() < 1e-5);
    }

    #[test]
    fn test_lifestyle_risk_table() {
        assert_eq!(lifestyle_risk(true, 31.0), LifestyleRisk::High);
        assert_eq!(lifestyle_risk(true, 30.0), LifestyleRisk::Medium);
        assert_eq!(lifestyle_risk(false, 30.1), LifestyleRisk::Medium);
        assert_eq!(lifestyle_risk(false, 30.0), LifestyleRisk::Low);
    }

    #[test]
    fn test_age_group_boundaries() {
        assert_eq!(age_group(1), AgeGroup::Young);
        assert_eq!(age_group(24), AgeGroup::Young);
        assert_eq!(age_group(25), AgeGroup::Adult);
        assert_eq!(age_group(44), AgeGroup::Adult);
        assert_eq!(age_group(45), AgeGroup::MiddleAged);
        assert_eq!(age_group(59), AgeGroup::MiddleAged);
        assert_eq!(age_group(60), AgeGroup::Senior);
        assert_eq!(age_group(119), AgeGroup::Senior);
    }

    #[test]
    fn test_derive_example_profile() {
        let derived = DerivedFeatures::derive(29, 1.75, 85.0, true, "Pune");
        assert!((derived.bmi - 27.76).abs() < 0.01);
        assert_eq!(derived.lifestyle_risk, LifestyleRisk::Medium);
        assert_eq!(derived.age_group, AgeGroup::Adult);
        assert_eq!(derived.city_category, CityTier::Tier1);
    }

    #[test]
    fn test_record_columns() {
        let derived = DerivedFeatures::derive(50, 1.6, 90.0, false, "Jaipur");
        let record = FeatureRecord::new(&derived, Occupation::BusinessOwner, 25.0);

        let names: Vec<_> = record.columns().map(|(name, _)| name).collect();
        assert_eq!(names, FeatureRecord::FEATURE_NAMES);

        assert_eq!(record.get("age_group"), Some(FeatureValue::Category("Middle_aged")));
        assert_eq!(record.get("lifestyle_risk"), Some(FeatureValue::Category("Medium")));
        assert_eq!(record.get("city_category"), Some(FeatureValue::Number(2.0)));
        assert_eq!(record.get("occupation"), Some(FeatureValue::Category("business_owner")));
        assert_eq!(record.get("income_lpa"), Some(FeatureValue::Number(25.0)));
        assert_eq!(record.get("height"), None);
    }

    #[test]
    fn test_record_serializes_model_labels() {
        let derived = DerivedFeatures::derive(50, 1.6, 90.0, false, "Shimla");
        let record = FeatureRecord::new(&derived, Occupation::Retired, 4.5);
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["age_group"], "Middle_aged");
        assert_eq!(json["city_category"], 3);
        assert_eq!(json["occupation"], "retired");
    }

    #[test]
    fn test_category_key() {
        assert_eq!(FeatureValue::Number(1.0).category_key(), "1");
        assert_eq!(FeatureValue::Number(2.5).category_key(), "2.5");
        assert_eq!(FeatureValue::Category("Adult").category_key(), "Adult");
    }

    proptest! {
        #[test]
        fn bmi_is_positive(weight in 0.001f64..500.0, height in 0.01f64..2.5) {
            let value = bmi(weight, height);
            prop_assert!(value > 0.0);
            prop_assert_eq!(value, weight / (height * height));
        }

        #[test]
        fn lifestyle_risk_matches_factor_count(smoker in any::<bool>(), bmi in 5.0f64..80.0) {
            let factors = smoker as u8 + (bmi > OBESITY_BMI) as u8;
            let expected = match factors {
                2 => LifestyleRisk::High,
                1 => LifestyleRisk::Medium,
                _ => LifestyleRisk::Low,
            };
            prop_assert_eq!(lifestyle_risk(smoker, bmi), expected);
        }

        #[test]
        fn age_group_partitions_valid_ages(age in 1u32..120) {
            let bands = [age < 25, (25..45).contains(&age), (45..60).contains(&age), age >= 60];
            prop_assert_eq!(bands.iter().filter(|b| **b).count(), 1);
            let expected = match bands.iter().position(|b| *b) {
                Some(0) => AgeGroup::Young,
                Some(1) => AgeGroup::Adult,
                Some(2) => AgeGroup::MiddleAged,
                _ => AgeGroup::Senior,
            };
            prop_assert_eq!(age_group(age), expected);
        }
    }
}
