use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Highest completed education level.
///
/// Deserialized leniently from any string: values outside the known set are
/// kept as `Other` and encode to the same ordinal as High School.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Education {
    HighSchool,
    Bachelor,
    Master,
    PhD,
    Other(String),
}

impl Education {
    /// Ordinal used by the classifier's `education_encoded` column.
    pub fn ordinal(&self) -> u8 {
        match self {
            Education::HighSchool | Education::Other(_) => 0,
            Education::Bachelor => 1,
            Education::Master => 2,
            Education::PhD => 3,
        }
    }
}

impl From<String> for Education {
    fn from(value: String) -> Self {
        match value.as_str() {
            "High School" => Education::HighSchool,
            "Bachelor" => Education::Bachelor,
            "Master" => Education::Master,
            "PhD" => Education::PhD,
            _ => Education::Other(value),
        }
    }
}

impl From<Education> for String {
    fn from(value: Education) -> Self {
        match value {
            Education::HighSchool => "High School".to_string(),
            Education::Bachelor => "Bachelor".to_string(),
            Education::Master => "Master".to_string(),
            Education::PhD => "PhD".to_string(),
            Education::Other(raw) => raw,
        }
    }
}

/// Self-reported personality traits, each expected in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub analytical: f64,
    pub creative: f64,
    pub social: f64,
}

impl Personality {
    /// Returns a message naming every trait outside `[0, 1]`.
    pub fn check_bounds(&self) -> Result<(), String> {
        let out_of_range: Vec<String> = [
            ("analytical", self.analytical),
            ("creative", self.creative),
            ("social", self.social),
        ]
        .into_iter()
        .filter(|(_, v)| !(v.is_finite() && (0.0..=1.0).contains(v)))
        .map(|(name, v)| format!("personality.{name} must be between 0 and 1 (got {v})"))
        .collect();

        if out_of_range.is_empty() {
            Ok(())
        } else {
            Err(out_of_range.join("; "))
        }
    }
}

/// Body of `POST /predict`.
///
/// Skills and interests are sets: ordering is irrelevant and duplicates collapse.
/// `experience` is unsigned, so a negative value is rejected at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub skills: BTreeSet<String>,
    pub interests: BTreeSet<String>,
    pub personality: Personality,
    pub education: Education,
    pub experience: u32,
}
