//! Result formatting: advice lines and clinic lookup.

use crate::domain::{Advice, AnalysisResult, ClinicLookup, HemoglobinEstimate, Status, Subject};

/// Advice for anaemic subjects: foods that raise hemoglobin.
const ANEMIC_ADVICE: &[(&str, &str)] = &[
    ("leafy_greens", "Leafy greens: spinach, kale, beetroot"),
    ("legumes", "Iron-rich legumes: lentils, chickpeas, soybeans"),
    ("fruits", "Fruits: apples, pomegranates, dates"),
    ("protein", "Protein: lean meat, liver, eggs"),
    ("vitamin_c", "Vitamin C: oranges, lemons (to help absorb iron)"),
];

/// Advice for subjects in the normal range.
const NORMAL_ADVICE: &[(&str, &str)] = &[
    ("balanced_diet", "Maintain a balanced diet with iron and vitamins"),
    ("hydration", "Drink plenty of water"),
    ("exercise_sleep", "Regular exercise and sleep"),
    ("checkups", "Get routine health check-ups"),
];

const MAP_BASE_URL: &str = "https://www.google.com/maps";

/// Returns the advice lines for a status.
#[must_use]
pub fn advice_for(status: Status) -> Vec<Advice> {
    let lines = match status {
        Status::Anemic => ANEMIC_ADVICE,
        Status::Normal => NORMAL_ADVICE,
    };
    lines
        .iter()
        .map(|(key, text)| Advice {
            key: (*key).to_string(),
            text: (*text).to_string(),
        })
        .collect()
}

/// Builds the clinic search for a location, or `None` if it is blank.
#[must_use]
pub fn clinic_lookup(location: &str) -> Option<ClinicLookup> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }
    // `/` stays literal in the query.
    let query = urlencoding::encode(&format!("clinics near {location}")).replace("%2F", "/");
    let map_url = format!("{MAP_BASE_URL}?q={query}&output=embed");
    Some(ClinicLookup {
        location: location.to_string(),
        query,
        map_url,
    })
}

/// Packages a classified estimate for presentation.
///
/// Clinic lookups are only offered to anaemic subjects; if one has no
/// location, `prompt_for_location` is set instead.
#[must_use]
pub fn format_result(
    estimate: HemoglobinEstimate,
    status: Status,
    subject: Subject,
    location: &str,
    source: impl Into<String>,
    timestamp: impl Into<String>,
) -> AnalysisResult {
    let (clinics, prompt_for_location) = match status {
        Status::Anemic => {
            let lookup = clinic_lookup(location);
            let prompt = lookup.is_none();
            (lookup, prompt)
        }
        Status::Normal => (None, false),
    };

    AnalysisResult {
        source: source.into(),
        timestamp: timestamp.into(),
        threshold: subject.sex.anemia_threshold(),
        subject,
        hemoglobin: estimate,
        status,
        advice: advice_for(status),
        clinics,
        prompt_for_location,
    }
}
