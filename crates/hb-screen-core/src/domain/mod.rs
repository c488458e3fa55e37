//! Core domain types for hemoglobin screening.

mod result;
mod screening;
mod upload;

pub use result::{Advice, AnalysisResult, ClinicLookup, Subject};
pub use screening::{
    HemoglobinEstimate, Sex, Status, FEMALE_ANEMIA_THRESHOLD, MALE_ANEMIA_THRESHOLD,
};
pub use upload::{ImageUpload, RawImage};
