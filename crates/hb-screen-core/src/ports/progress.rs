//! Progress reporting port for UI integration.

use crate::domain::AnalysisResult;

/// Pipeline stages reported while an analysis runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Decoding the uploaded bytes.
    Decoding,
    /// Resizing and scaling into the model tensor.
    Normalizing,
    /// Running the hemoglobin model.
    Estimating,
    /// Applying thresholds and building advice.
    Classifying,
}

impl Stage {
    /// Short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Decoding => "Decoding image",
            Self::Normalizing => "Preparing image",
            Self::Estimating => "Analyzing image",
            Self::Classifying => "Classifying",
        }
    }
}

/// Events emitted during analysis for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started for an image.
    Started {
        /// Source of the image.
        source: String,
    },
    /// The pipeline entered a new stage.
    Stage {
        /// The stage being entered.
        stage: Stage,
    },
    /// Analysis completed.
    Completed {
        /// The analysis result.
        result: AnalysisResult,
    },
    /// Analysis was aborted.
    Failed {
        /// Reason for aborting.
        reason: String,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
