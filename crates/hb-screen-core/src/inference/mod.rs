//! ML inference using Candle.
//!
//! Provides the hemoglobin regressor, safetensors loading and the
//! [`InferenceEngine`] that wraps them with caching, a time budget and the
//! fallback policy.

mod device;
mod engine;
mod loader;
mod regressor;
mod utils;

pub use device::select_device;
pub use engine::{
    EngineConfig, HbModel, InferenceEngine, ModelLoader, DEFAULT_TIMEOUT, FALLBACK_RANGE,
};
pub use loader::{load_safetensors, SafetensorsLoader};
pub use regressor::HbRegressor;
pub use utils::round_to;
