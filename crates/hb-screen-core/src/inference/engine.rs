//! Hemoglobin inference engine.
//!
//! Owns the model handle for the lifetime of the engine and turns a
//! normalized tensor into a tagged [`HemoglobinEstimate`]. Model failures
//! never abort a request: they are logged and answered with a fallback
//! value drawn from a plausible range, tagged as such.

use std::ops::RangeInclusive;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::round_to;
use crate::domain::HemoglobinEstimate;
use crate::error::{InferenceError, ModelLoadError};
use crate::pipeline::NormalizedTensor;

/// Default wall-clock budget for one forward pass.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Range fallback estimates are drawn from, in g/dL.
pub const FALLBACK_RANGE: RangeInclusive<f64> = 7.0..=16.0;

/// A loaded hemoglobin model.
pub trait HbModel: Send + Sync {
    /// Runs one forward pass and returns the raw scalar output.
    ///
    /// # Errors
    ///
    /// Returns an error if the computation fails or does not yield exactly
    /// one value.
    fn predict(&self, input: &NormalizedTensor) -> Result<f32, InferenceError>;
}

/// Produces a model handle from some artifact.
pub trait ModelLoader: Send + Sync {
    /// Human-readable artifact description for logs.
    fn describe(&self) -> String;

    /// Loads the model.
    ///
    /// # Errors
    ///
    /// Returns an error if the artifact is missing or unusable.
    fn load(&self) -> Result<Arc<dyn HbModel>, ModelLoadError>;
}

/// Engine tuning.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Budget for a single forward pass.
    pub timeout: Duration,
    /// Seed for the fallback sampler; entropy when unset.
    pub fallback_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            fallback_seed: None,
        }
    }
}

/// Inference engine with a lazily loaded, cached model.
///
/// The model is loaded on first use. A failed load is cached as well, so
/// every later estimate goes straight to the fallback; build a new engine
/// to retry.
///
/// A forward pass that overruns its budget keeps running on its worker.
/// Until it finishes, estimates fall back without starting another one, so
/// a hung model pins at most one thread.
pub struct InferenceEngine {
    loader: Box<dyn ModelLoader>,
    model: OnceLock<Result<Arc<dyn HbModel>, String>>,
    timeout: Duration,
    overrun: Mutex<Option<Arc<AtomicBool>>>,
    fallback: FallbackSampler,
}

impl InferenceEngine {
    /// Creates an engine around `loader`. Nothing is loaded yet.
    #[must_use]
    pub fn new(loader: impl ModelLoader + 'static, config: EngineConfig) -> Self {
        Self {
            loader: Box::new(loader),
            model: OnceLock::new(),
            timeout: config.timeout,
            overrun: Mutex::new(None),
            fallback: FallbackSampler::new(config.fallback_seed),
        }
    }

    /// Returns true once a model has been loaded successfully.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self.model.get(), Some(Ok(_)))
    }

    /// Estimates hemoglobin for a normalized image.
    ///
    /// Always returns a finite value: [`HemoglobinEstimate::Real`] when the
    /// model answered, [`HemoglobinEstimate::Fallback`] otherwise.
    pub fn estimate(&self, input: &NormalizedTensor) -> HemoglobinEstimate {
        match self.try_estimate(input) {
            Ok(value) => {
                let value = round_to(f64::from(value), 2);
                debug!("Model estimate: {value} g/dL");
                HemoglobinEstimate::Real(value)
            }
            Err(e) => {
                let value = self.fallback.sample();
                warn!("Hemoglobin model unavailable, using fallback estimate {value}: {e:#}");
                HemoglobinEstimate::Fallback(value)
            }
        }
    }

    fn try_estimate(&self, input: &NormalizedTensor) -> Result<f32> {
        let model = self.model()?;
        let value = self.predict_within_budget(model, input)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(InferenceError::Output(format!("non-finite value {value}")).into())
        }
    }

    /// Loads or returns the cached model.
    fn model(&self) -> Result<&Arc<dyn HbModel>> {
        let result = self.model.get_or_init(|| {
            info!("Loading hemoglobin model from {}", self.loader.describe());
            self.loader.load().map_err(|e| e.to_string())
        });

        result
            .as_ref()
            .map_err(|e| anyhow!("model load failed: {e}"))
    }

    /// Runs the forward pass on a worker thread, giving up after the budget.
    ///
    /// A worker that overruns is detached and remembered; its eventual
    /// answer is dropped, and no new worker starts until it has finished.
    fn predict_within_budget(
        &self,
        model: &Arc<dyn HbModel>,
        input: &NormalizedTensor,
    ) -> Result<f32, InferenceError> {
        let mut overrun = self.overrun.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(finished) = overrun.as_ref() {
            if !finished.load(Ordering::Acquire) {
                return Err(InferenceError::Stalled);
            }
            debug!("Overrunning forward pass has finished");
            *overrun = None;
        }
        drop(overrun);

        let (tx, rx) = mpsc::channel();
        let finished = Arc::new(AtomicBool::new(false));
        let done = FinishedOnDrop(Arc::clone(&finished));
        let model = Arc::clone(model);
        let input = input.clone();

        thread::Builder::new()
            .name("hb-inference".into())
            .spawn(move || {
                let _done = done;
                let _ = tx.send(model.predict(&input));
            })
            .map_err(|e| InferenceError::Forward(format!("failed to spawn worker: {e}")))?;

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                *self.overrun.lock().unwrap_or_else(PoisonError::into_inner) = Some(finished);
                Err(InferenceError::Timeout(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(InferenceError::WorkerLost),
        }
    }
}

/// Marks a worker finished when it exits, including by panic.
struct FinishedOnDrop(Arc<AtomicBool>);

impl Drop for FinishedOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Uniform sampler for fallback estimates.
struct FallbackSampler {
    rng: Mutex<StdRng>,
}

impl FallbackSampler {
    fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Draws from [`FALLBACK_RANGE`], rounded to one decimal.
    fn sample(&self) -> f64 {
        let raw = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(FALLBACK_RANGE);
        round_to(raw, 1)
    }
}
