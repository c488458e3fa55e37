//! Regressor weight fixtures.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use safetensors::tensor::TensorView;

/// Serializes regressor weights whose output is always `bias`.
///
/// All convolution and linear weights are zero, so the forward pass
/// reduces to the final layer's bias.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn regressor_safetensors(bias: f32) -> Result<Vec<u8>> {
    let entries: Vec<(&str, Vec<usize>, Vec<f32>)> = vec![
        ("conv1.weight", vec![8, 3, 3, 3], vec![0.0; 8 * 3 * 3 * 3]),
        ("conv1.bias", vec![8], vec![0.0; 8]),
        ("conv2.weight", vec![16, 8, 3, 3], vec![0.0; 16 * 8 * 3 * 3]),
        ("conv2.bias", vec![16], vec![0.0; 16]),
        ("fc.weight", vec![1, 16], vec![0.0; 16]),
        ("fc.bias", vec![1], vec![bias]),
    ];

    let mut views = HashMap::new();
    for (name, shape, data) in &entries {
        let bytes: &[u8] = bytemuck::cast_slice(data.as_slice());
        let view = TensorView::new(safetensors::Dtype::F32, shape.clone(), bytes)
            .with_context(|| format!("tensor view {name}"))?;
        views.insert((*name).to_string(), view);
    }

    safetensors::serialize(&views, &None).context("serialize regressor weights")
}

/// Writes [`regressor_safetensors`] to `path`.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_regressor_safetensors(path: impl AsRef<Path>, bias: f32) -> Result<()> {
    let path = path.as_ref();
    let bytes = regressor_safetensors(bias)?;
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))
}
