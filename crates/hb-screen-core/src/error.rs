//! Error types for the screening pipeline.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that abort an analysis request.
///
/// Model failures are not listed here: the inference engine absorbs them
/// and reports a [`HemoglobinEstimate::Fallback`](crate::HemoglobinEstimate::Fallback)
/// instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The request carried no palm image.
    #[error("no palm image provided")]
    NoImage,

    /// The upload could not be decoded as an image.
    #[error("failed to decode image from {source_name}: {source}")]
    Decode {
        source_name: String,
        #[source]
        source: image::ImageError,
    },
}

/// Failure to load the hemoglobin model artifact.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    /// No artifact path was configured.
    #[error("model path not configured")]
    NotConfigured,

    /// The artifact file could not be read.
    #[error("failed to read model file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact was read but is not a usable model.
    #[error("invalid model artifact {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// Failure during a forward pass.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Tensor construction or the model computation failed.
    #[error("forward pass failed: {0}")]
    Forward(String),

    /// The model produced something other than a single finite value.
    #[error("unexpected model output: {0}")]
    Output(String),

    /// The forward pass exceeded its wall-clock budget.
    #[error("forward pass exceeded {0:?}")]
    Timeout(Duration),

    /// An earlier forward pass overran its budget and is still running.
    #[error("previous forward pass still running")]
    Stalled,

    /// The worker running the forward pass went away without answering.
    #[error("inference worker terminated")]
    WorkerLost,
}

impl From<candle_core::Error> for InferenceError {
    fn from(e: candle_core::Error) -> Self {
        Self::Forward(e.to_string())
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
