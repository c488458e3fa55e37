//! Threshold classification.

use crate::domain::{Sex, Status};

/// Classifies a hemoglobin value (g/dL) against the threshold for `sex`.
///
/// A value exactly at the threshold is [`Status::Normal`].
#[must_use]
pub fn classify(estimate: f64, sex: Sex) -> Status {
    if estimate < sex.anemia_threshold() {
        Status::Anemic
    } else {
        Status::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_male_boundary() {
        assert_eq!(classify(13.0, Sex::Male), Status::Normal);
        assert_eq!(classify(12.99, Sex::Male), Status::Anemic);
        assert_eq!(classify(15.2, Sex::Male), Status::Normal);
    }

    #[test]
    fn test_female_boundary() {
        assert_eq!(classify(12.0, Sex::Female), Status::Normal);
        assert_eq!(classify(11.99, Sex::Female), Status::Anemic);
    }

    #[test]
    fn test_same_value_differs_by_sex() {
        assert_eq!(classify(12.5, Sex::Male), Status::Anemic);
        assert_eq!(classify(12.5, Sex::Female), Status::Normal);
    }

    #[test]
    fn test_tiny_estimate_is_anemic() {
        assert_eq!(classify(0.12, Sex::Male), Status::Anemic);
        assert_eq!(classify(0.0, Sex::Female), Status::Anemic);
    }
}
