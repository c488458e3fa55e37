//! Mock implementations of core ports and model seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use hb_screen_core::{
    AnalysisResult, HbModel, ImageSource, ImageUpload, InferenceError, ModelLoadError,
    ModelLoader, NormalizedTensor, ProgressEvent, ProgressSink, ResultOutput, Stage,
};

/// Scripted model behaviour.
#[derive(Debug, Clone)]
pub enum MockModel {
    /// Always answers this value.
    Fixed(f32),
    /// Always fails the forward pass.
    Failing,
    /// Answers after sleeping, to exercise time budgets.
    Slow(Duration, f32),
}

impl HbModel for MockModel {
    fn predict(&self, _input: &NormalizedTensor) -> Result<f32, InferenceError> {
        match self {
            Self::Fixed(v) => Ok(*v),
            Self::Failing => Err(InferenceError::Forward("mock failure".into())),
            Self::Slow(delay, v) => {
                std::thread::sleep(*delay);
                Ok(*v)
            }
        }
    }
}

/// Mock implementation of `ModelLoader` for testing.
///
/// Counts load attempts; the counter is shared with clones so tests can keep
/// a handle after moving the loader into an engine.
#[derive(Clone)]
pub struct MockLoader {
    model: Option<MockModel>,
    attempts: Arc<AtomicUsize>,
}

impl MockLoader {
    /// A loader whose model always answers `value`.
    #[must_use]
    pub fn fixed(value: f32) -> Self {
        Self::with_model(MockModel::Fixed(value))
    }

    /// A loader that hands out `model`.
    #[must_use]
    pub fn with_model(model: MockModel) -> Self {
        Self {
            model: Some(model),
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A loader that always fails, like a missing artifact.
    #[must_use]
    pub fn missing() -> Self {
        Self {
            model: None,
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns the number of load attempts so far.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl ModelLoader for MockLoader {
    fn describe(&self) -> String {
        "mock".into()
    }

    fn load(&self) -> Result<Arc<dyn HbModel>, ModelLoadError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match &self.model {
            Some(model) => Ok(Arc::new(model.clone())),
            None => Err(ModelLoadError::Invalid {
                path: "mock.safetensors".into(),
                reason: "mock artifact missing".into(),
            }),
        }
    }
}

/// Mock implementation of `ImageSource` for testing.
pub struct MockImageSource {
    upload: Option<ImageUpload>,
    calls: AtomicUsize,
}

impl MockImageSource {
    /// Creates a source yielding `upload`.
    #[must_use]
    pub const fn new(upload: Option<ImageUpload>) -> Self {
        Self {
            upload,
            calls: AtomicUsize::new(0),
        }
    }

    /// Creates a source with no image.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(None)
    }

    /// Returns how often the upload was requested.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageSource for MockImageSource {
    fn upload(&self) -> anyhow::Result<Option<ImageUpload>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.upload.clone())
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures results for later assertions.
pub struct MockResultOutput {
    results: Arc<Mutex<Vec<AnalysisResult>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured results.
    #[must_use]
    pub fn results(&self) -> Vec<AnalysisResult> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn present(&self, result: &AnalysisResult) -> anyhow::Result<()> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

/// Mock implementation of `ProgressSink` for testing.
///
/// Captures events for later assertions.
pub struct MockProgressSink {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressSink {
    /// Creates a new mock progress sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured events.
    #[must_use]
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the stages entered, in order.
    #[must_use]
    pub fn stages(&self) -> Vec<Stage> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                ProgressEvent::Stage { stage } => Some(*stage),
                _ => None,
            })
            .collect()
    }

    /// Returns whether a `Completed` event was received.
    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, ProgressEvent::Completed { .. }))
    }

    /// Returns the reason from the `Failed` event, if any.
    #[must_use]
    pub fn failure(&self) -> Option<String> {
        self.events().into_iter().find_map(|e| match e {
            ProgressEvent::Failed { reason } => Some(reason),
            _ => None,
        })
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for MockProgressSink {
    fn on_event(&self, event: ProgressEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
