//! hb-screen core - domain logic for palm-image hemoglobin screening.
//!
//! This crate contains the domain types, ports, and the screening pipeline:
//! image normalization, model inference with a tagged fallback, threshold
//! classification, and result formatting.

pub mod domain;
pub mod error;
pub mod inference;
pub mod pipeline;
pub mod ports;

pub use domain::{
    Advice, AnalysisResult, ClinicLookup, HemoglobinEstimate, ImageUpload, RawImage, Sex, Status,
    Subject,
};
pub use error::{Error, InferenceError, ModelLoadError, Result};
pub use inference::{EngineConfig, HbModel, InferenceEngine, ModelLoader, SafetensorsLoader};
pub use pipeline::{classify, format_result, normalize, AnalyzeRequest, Analyzer, NormalizedTensor};
pub use ports::{ImageSource, ProgressEvent, ProgressSink, ResultOutput, Stage};
