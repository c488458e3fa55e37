//! Analysis result types.

use serde::{Deserialize, Serialize};

use super::{HemoglobinEstimate, Sex, Status};

/// Complete screening result for a single palm image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Source of the analyzed image.
    pub source: String,
    /// Timestamp of analysis (RFC 3339, UTC).
    pub timestamp: String,
    /// Who was screened.
    pub subject: Subject,
    /// Estimated hemoglobin and its provenance.
    pub hemoglobin: HemoglobinEstimate,
    /// Threshold applied for the subject's sex, in g/dL.
    pub threshold: f64,
    /// Screening outcome.
    pub status: Status,
    /// Advice lines matching the status.
    pub advice: Vec<Advice>,
    /// Clinic search for anaemic subjects who gave a location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinics: Option<ClinicLookup>,
    /// Set when an anaemic subject gave no location to search around.
    pub prompt_for_location: bool,
}

/// Demographic details entered alongside the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Age in years.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    /// Sex, which selects the anaemia threshold.
    pub sex: Sex,
}

impl Subject {
    /// Creates an anonymous subject of the given sex.
    #[must_use]
    pub const fn new(sex: Sex) -> Self {
        Self {
            name: None,
            age: None,
            sex,
        }
    }
}

/// A single advice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    /// Stable key for presentation layers.
    pub key: String,
    /// Human-readable text.
    pub text: String,
}

/// Search for clinics near the subject's location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicLookup {
    /// Location as entered.
    pub location: String,
    /// URL-encoded search string.
    pub query: String,
    /// Embeddable map URL for the search.
    pub map_url: String,
}
