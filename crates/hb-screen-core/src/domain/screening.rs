//! Screening vocabulary: sex, status, thresholds and the tagged estimate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Anaemia cut-off for men, in g/dL.
pub const MALE_ANEMIA_THRESHOLD: f64 = 13.0;
/// Anaemia cut-off for women, in g/dL.
pub const FEMALE_ANEMIA_THRESHOLD: f64 = 12.0;

/// Biological sex of the screened subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl Sex {
    /// Hemoglobin level below which the subject is classified anaemic.
    #[must_use]
    pub const fn anemia_threshold(self) -> f64 {
        match self {
            Self::Male => MALE_ANEMIA_THRESHOLD,
            Self::Female => FEMALE_ANEMIA_THRESHOLD,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("Male"),
            Self::Female => f.write_str("Female"),
        }
    }
}

/// Screening outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Estimate is below the threshold for the subject's sex.
    Anemic,
    /// Estimate is at or above the threshold.
    Normal,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anemic => f.write_str("Anemic"),
            Self::Normal => f.write_str("Normal"),
        }
    }
}

/// Hemoglobin estimate in g/dL, tagged with its provenance.
///
/// Serialized as `{"source": "model" | "fallback", "value": f64}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "value")]
pub enum HemoglobinEstimate {
    /// Produced by a forward pass, rounded to 2 decimals.
    #[serde(rename = "model")]
    Real(f64),
    /// Substituted because the model was unavailable, rounded to 1 decimal.
    #[serde(rename = "fallback")]
    Fallback(f64),
}

impl HemoglobinEstimate {
    /// Returns the estimate in g/dL regardless of provenance.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Real(v) | Self::Fallback(v) => v,
        }
    }

    /// Returns true if the value was fabricated by the fallback path.
    #[must_use]
    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(Sex::Male.anemia_threshold(), 13.0);
        assert_eq!(Sex::Female.anemia_threshold(), 12.0);
    }

    #[test]
    fn test_estimate_accessors() {
        assert_eq!(HemoglobinEstimate::Real(12.34).value(), 12.34);
        assert!(!HemoglobinEstimate::Real(12.34).is_fallback());
        assert!(HemoglobinEstimate::Fallback(9.1).is_fallback());
    }

    #[test]
    fn test_estimate_serializes_provenance() {
        let json = serde_json::to_value(HemoglobinEstimate::Fallback(9.1)).unwrap();
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["value"], 9.1);

        let json = serde_json::to_value(HemoglobinEstimate::Real(0.12)).unwrap();
        assert_eq!(json["source"], "model");
    }

    #[test]
    fn test_sex_serde_names() {
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"female\"");
        assert_eq!(serde_json::to_string(&Status::Anemic).unwrap(), "\"anemic\"");
    }
}
