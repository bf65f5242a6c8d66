//! City Normalization and Tier Lookup

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Tier-1 (metro) cities
pub const TIER_1_CITIES: &[&str] = &[
    "Mumbai", "Delhi", "Bangalore", "Chennai", "Kolkata", "Hyderabad", "Pune",
];

/// Tier-2 cities
pub const TIER_2_CITIES: &[&str] = &[
    "Jaipur", "Chandigarh", "Indore", "Lucknow", "Patna", "Ranchi", "Visakhapatnam",
    "Coimbatore", "Bhopal", "Nagpur", "Vadodara", "Surat", "Rajkot", "Jodhpur", "Raipur",
    "Amritsar", "Varanasi", "Agra", "Dehradun", "Mysore", "Jabalpur", "Guwahati",
    "Thiruvananthapuram", "Ludhiana", "Nashik", "Allahabad", "Udaipur", "Aurangabad", "Hubli",
    "Belgaum", "Salem", "Vijayawada", "Tiruchirappalli", "Bhavnagar", "Gwalior", "Dhanbad",
    "Bareilly", "Aligarh", "Gaya", "Kozhikode", "Warangal", "Kolhapur", "Bilaspur",
    "Jalandhar", "Noida", "Guntur", "Asansol", "Siliguri",
];

/// City tier, serialized as the integer 1, 2 or 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CityTier {
    Tier1,
    Tier2,
    Tier3,
}

impl CityTier {
    /// Numeric tier as fed to the model
    pub fn as_u8(&self) -> u8 {
        match self {
            CityTier::Tier1 => 1,
            CityTier::Tier2 => 2,
            CityTier::Tier3 => 3,
        }
    }

    /// Inverse of [`CityTier::as_u8`]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(CityTier::Tier1),
            2 => Some(CityTier::Tier2),
            3 => Some(CityTier::Tier3),
            _ => None,
        }
    }
}

impl Serialize for CityTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for CityTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        CityTier::from_u8(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid city tier {}", value)))
    }
}

/// Trim surrounding whitespace and title-case each word.
///
/// An alphabetic character is upper-cased when it starts the string or
/// follows a non-alphabetic one, and lower-cased otherwise, so `"new delhi"`
/// becomes `"New Delhi"` and `"o'neil"` becomes `"O'Neil"`. Applying it
/// twice yields the same string.
pub fn normalize_city(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());
    let mut prev_alpha = false;

    for ch in trimmed.chars() {
        push_title_cased(&mut out, ch, &mut prev_alpha);
    }

    out
}

/// Case one character against the previously emitted one. Multi-char case
/// expansions ("ß" -> "SS") are fed back one char at a time so the output
/// is stable under a second pass.
fn push_title_cased(out: &mut String, ch: char, prev_alpha: &mut bool) {
    if !ch.is_alphabetic() {
        out.push(ch);
        *prev_alpha = false;
        return;
    }

    let mapped: Vec<char> = if *prev_alpha {
        ch.to_lowercase().collect()
    } else {
        ch.to_uppercase().collect()
    };

    match mapped.as_slice() {
        [single] => {
            out.push(*single);
            *prev_alpha = single.is_alphabetic();
        }
        expanded => {
            for &c in expanded {
                push_title_cased(out, c, prev_alpha);
            }
        }
    }
}

/// Tier of an already-normalized city name. Tier 1 takes precedence.
pub fn city_tier(normalized: &str) -> CityTier {
    if TIER_1_CITIES.contains(&normalized) {
        CityTier::Tier1
    } else if TIER_2_CITIES.contains(&normalized) {
        CityTier::Tier2
    } else {
        CityTier::Tier3
    }
}
