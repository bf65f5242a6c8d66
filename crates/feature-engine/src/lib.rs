//! Feature Engineering Engine
//!
//! Pure derivation of the engineered features consumed by the premium
//! classifier: BMI, lifestyle risk, age group and city tier.

mod city;
mod features;
mod occupation;

pub use city::{city_tier, normalize_city, CityTier, TIER_1_CITIES, TIER_2_CITIES};
pub use features::{
    age_group, bmi, lifestyle_risk, AgeGroup, DerivedFeatures, FeatureRecord, FeatureValue,
    LifestyleRisk,
};
pub use occupation::Occupation;

use thiserror::Error;

/// Errors raised while interpreting raw feature values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    #[error("invalid occupation: {0}")]
    UnknownOccupation(String),
}
