//! Model loading from safetensors artifacts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use safetensors::SafeTensors;
use tracing::debug;

use super::{HbModel, HbRegressor, ModelLoader};
use crate::error::ModelLoadError;

/// Loads an [`HbRegressor`] from a safetensors file.
pub struct SafetensorsLoader {
    path: Option<PathBuf>,
    device: Device,
}

impl SafetensorsLoader {
    /// Creates a loader for the artifact at `path`.
    ///
    /// A `None` path is allowed; loading then fails with
    /// [`ModelLoadError::NotConfigured`].
    #[must_use]
    pub const fn new(path: Option<PathBuf>, device: Device) -> Self {
        Self { path, device }
    }
}

impl ModelLoader for SafetensorsLoader {
    fn describe(&self) -> String {
        self.path.as_ref().map_or_else(
            || "<unconfigured>".to_string(),
            |p| p.display().to_string(),
        )
    }

    fn load(&self) -> Result<Arc<dyn HbModel>, ModelLoadError> {
        let path = self.path.as_ref().ok_or(ModelLoadError::NotConfigured)?;
        let vb = load_safetensors(path, &self.device)?;
        let model = HbRegressor::new(vb).map_err(|e| ModelLoadError::Invalid {
            path: path.clone(),
            reason: format!("{e:#}"),
        })?;
        Ok(Arc::new(model))
    }
}

/// Loads a safetensors file and creates a `VarBuilder` over its tensors.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The safetensors data is invalid or uses an unsupported dtype
pub fn load_safetensors(
    path: impl AsRef<Path>,
    device: &Device,
) -> Result<VarBuilder<'static>, ModelLoadError> {
    let path = path.as_ref();
    debug!("Loading safetensors from {}", path.display());

    let invalid = |reason: String| ModelLoadError::Invalid {
        path: path.to_path_buf(),
        reason,
    };

    let data = std::fs::read(path).map_err(|source| ModelLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let tensors = SafeTensors::deserialize(&data).map_err(|e| invalid(e.to_string()))?;

    let mut tensor_map: HashMap<String, Tensor> = HashMap::new();
    for (name, view) in tensors.tensors() {
        let dtype = candle_dtype(view.dtype()).map_err(&invalid)?;
        let tensor = Tensor::from_raw_buffer(view.data(), dtype, view.shape(), device)
            .map_err(|e| invalid(format!("tensor '{name}': {e}")))?;
        tensor_map.insert(name, tensor);
    }

    debug!("Loaded {} tensors", tensor_map.len());
    Ok(VarBuilder::from_tensors(tensor_map, DType::F32, device))
}

/// Maps a safetensors dtype onto candle's.
fn candle_dtype(dtype: safetensors::Dtype) -> Result<DType, String> {
    use safetensors::Dtype as S;
    match dtype {
        S::F32 => Ok(DType::F32),
        S::F64 => Ok(DType::F64),
        S::F16 => Ok(DType::F16),
        S::BF16 => Ok(DType::BF16),
        other => Err(format!("unsupported dtype {other:?}")),
    }
}
