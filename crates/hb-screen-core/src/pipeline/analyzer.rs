//! End-to-end analysis of one screening request.

use tracing::{debug, info};

use super::{classify, format_result, normalize};
use crate::domain::{AnalysisResult, ImageUpload, RawImage, Subject};
use crate::error::{Error, Result};
use crate::inference::InferenceEngine;
use crate::ports::{ProgressEvent, ProgressSink, Stage};

/// Everything one "analyze" action needs.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    /// The palm image, if the user supplied one.
    pub image: Option<ImageUpload>,
    /// Who is being screened.
    pub subject: Subject,
    /// Free-text location used for the clinic search.
    pub location: String,
}

/// Runs the screening pipeline against an injected inference engine.
pub struct Analyzer<'a> {
    engine: &'a InferenceEngine,
    progress: Option<&'a dyn ProgressSink>,
}

impl<'a> Analyzer<'a> {
    /// Creates an analyzer that reports no progress.
    #[must_use]
    pub const fn new(engine: &'a InferenceEngine) -> Self {
        Self {
            engine,
            progress: None,
        }
    }

    /// Reports progress events to `sink`.
    #[must_use]
    pub fn with_progress(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Analyzes a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoImage`] without touching the model when the
    /// request has no image, and [`Error::Decode`] when the image cannot be
    /// decoded. Model problems are not errors; see [`InferenceEngine::estimate`].
    pub fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisResult> {
        let result = self.run(request);
        if let Err(ref e) = result {
            self.emit(ProgressEvent::Failed {
                reason: e.to_string(),
            });
        }
        result
    }

    fn run(&self, request: AnalyzeRequest) -> Result<AnalysisResult> {
        let AnalyzeRequest {
            image,
            subject,
            location,
        } = request;

        let upload = image.ok_or(Error::NoImage)?;
        self.emit(ProgressEvent::Started {
            source: upload.source.clone(),
        });

        self.emit(ProgressEvent::Stage {
            stage: Stage::Decoding,
        });
        let raw = RawImage::decode(&upload)?;

        self.emit(ProgressEvent::Stage {
            stage: Stage::Normalizing,
        });
        let tensor = normalize(&raw);

        self.emit(ProgressEvent::Stage {
            stage: Stage::Estimating,
        });
        let estimate = self.engine.estimate(&tensor);

        self.emit(ProgressEvent::Stage {
            stage: Stage::Classifying,
        });
        let status = classify(estimate.value(), subject.sex);
        debug!(
            "{}: {} g/dL ({}) vs {} -> {status}",
            raw.source,
            estimate.value(),
            if estimate.is_fallback() { "fallback" } else { "model" },
            subject.sex.anemia_threshold()
        );

        let result = format_result(
            estimate,
            status,
            subject,
            &location,
            raw.source,
            iso_timestamp(),
        );
        info!("Screening complete: {status}");

        self.emit(ProgressEvent::Completed {
            result: result.clone(),
        });
        Ok(result)
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(sink) = self.progress {
            sink.on_event(event);
        }
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
