//! Screening pipeline stages.
//!
//! `normalize` → [`InferenceEngine::estimate`](crate::inference::InferenceEngine::estimate)
//! → `classify` → `format_result`, tied together by [`Analyzer`].

mod analyzer;
mod classify;
mod format;
mod normalize;

pub use analyzer::{AnalyzeRequest, Analyzer};
pub use classify::classify;
pub use format::{advice_for, clinic_lookup, format_result};
pub use normalize::{normalize, NormalizedTensor, CHANNELS, INPUT_SIZE, TENSOR_SHAPE};
