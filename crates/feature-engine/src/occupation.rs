//! Occupation Enumeration

use crate::FeatureError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Occupation categories understood by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupation {
    Retired,
    Freelancer,
    Student,
    GovernmentJob,
    BusinessOwner,
    Unemployed,
    PrivateJob,
}

impl Occupation {
    /// Every accepted occupation, in declaration order
    pub const ALL: [Occupation; 7] = [
        Occupation::Retired,
        Occupation::Freelancer,
        Occupation::Student,
        Occupation::GovernmentJob,
        Occupation::BusinessOwner,
        Occupation::Unemployed,
        Occupation::PrivateJob,
    ];

    /// Wire literal, as sent by clients and seen by the model
    pub fn as_str(&self) -> &'static str {
        match self {
            Occupation::Retired => "retired",
            Occupation::Freelancer => "freelancer",
            Occupation::Student => "student",
            Occupation::GovernmentJob => "government_job",
            Occupation::BusinessOwner => "business_owner",
            Occupation::Unemployed => "unemployed",
            Occupation::PrivateJob => "private_job",
        }
    }
}

impl FromStr for Occupation {
    type Err = FeatureError;

    /// Exact, case-sensitive match against the wire literals
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|occupation| occupation.as_str() == s)
            .ok_or_else(|| FeatureError::UnknownOccupation(s.to_string()))
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_literals() {
        for occupation in Occupation::ALL {
            assert_eq!(occupation.as_str().parse::<Occupation>(), Ok(occupation));
        }
    }

    #[test]
    fn test_rejects_unknown_and_miscased() {
        assert!("ceo".parse::<Occupation>().is_err());
        assert!("Private_Job".parse::<Occupation>().is_err());
        assert!(" student".parse::<Occupation>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_literals() {
        let json = serde_json::to_string(&Occupation::GovernmentJob).unwrap();
        assert_eq!(json, "\"government_job\"");
        let back: Occupation = serde_json::from_str("\"business_owner\"").unwrap();
        assert_eq!(back, Occupation::BusinessOwner);
    }
}
