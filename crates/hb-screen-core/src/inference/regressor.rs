//! Hemoglobin regression CNN.
//!
//! A compact convolutional regressor mapping a normalized palm image to a
//! single hemoglobin value in g/dL.

use anyhow::Result;
use candle_core::{Device, Module, Tensor};
use candle_nn::{conv2d, linear, Conv2d, Conv2dConfig, Linear, VarBuilder};

use super::HbModel;
use crate::error::InferenceError;
use crate::pipeline::NormalizedTensor;

/// Channels produced by the first convolution.
const CONV1_CHANNELS: usize = 8;
/// Channels produced by the second convolution.
const CONV2_CHANNELS: usize = 16;

/// Hemoglobin regressor.
///
/// Architecture: two strided 3x3 conv layers with ReLU, global average
/// pooling, one linear output.
/// Input: `(1, 224, 224, 3)` NHWC in `[0, 1]`
/// Output: hemoglobin estimate in g/dL
///
/// Weight names: `conv1.*`, `conv2.*`, `fc.*`.
pub struct HbRegressor {
    conv1: Conv2d,
    conv2: Conv2d,
    fc: Linear,
    device: Device,
}

impl HbRegressor {
    /// Creates the regressor from weights.
    ///
    /// # Errors
    ///
    /// Returns an error if a weight is missing or has the wrong shape.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(vb: VarBuilder) -> Result<Self> {
        let device = vb.device().clone();
        let config = Conv2dConfig {
            stride: 2,
            padding: 1,
            ..Conv2dConfig::default()
        };

        // 224x224 -> 112x112
        let conv1 = conv2d(3, CONV1_CHANNELS, 3, config, vb.pp("conv1"))?;
        // 112x112 -> 56x56
        let conv2 = conv2d(CONV1_CHANNELS, CONV2_CHANNELS, 3, config, vb.pp("conv2"))?;
        let fc = linear(CONV2_CHANNELS, 1, vb.pp("fc"))?;

        Ok(Self {
            conv1,
            conv2,
            fc,
            device,
        })
    }
}

impl Module for HbRegressor {
    fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        let x = self.conv1.forward(x)?.relu()?;
        let x = self.conv2.forward(&x)?.relu()?;

        // Global average pool: (1, C, H, W) -> (1, C)
        let x = x.mean(3)?.mean(2)?;

        self.fc.forward(&x)
    }
}

impl HbModel for HbRegressor {
    fn predict(&self, input: &NormalizedTensor) -> Result<f32, InferenceError> {
        // NHWC -> NCHW
        let x = input
            .to_tensor(&self.device)?
            .permute((0, 3, 1, 2))?
            .contiguous()?;

        let output = self.forward(&x)?.flatten_all()?.to_vec1::<f32>()?;
        match output.as_slice() {
            [value] => Ok(*value),
            values => Err(InferenceError::Output(format!(
                "expected a single value, got {}",
                values.len()
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use candle_core::DType;
    use std::collections::HashMap;

    fn weights(fc_bias: f32) -> VarBuilder<'static> {
        let dev = Device::Cpu;
        let zeros = |shape: &[usize]| Tensor::zeros(shape, DType::F32, &dev).unwrap();
        let map = HashMap::from([
            ("conv1.weight".to_string(), zeros(&[8, 3, 3, 3])),
            ("conv1.bias".to_string(), zeros(&[8])),
            ("conv2.weight".to_string(), zeros(&[16, 8, 3, 3])),
            ("conv2.bias".to_string(), zeros(&[16])),
            ("fc.weight".to_string(), zeros(&[1, 16])),
            (
                "fc.bias".to_string(),
                Tensor::new(&[fc_bias], &dev).unwrap(),
            ),
        ]);
        VarBuilder::from_tensors(map, DType::F32, &dev)
    }

    #[test]
    fn test_forward_output_is_bias_with_zero_weights() {
        let model = HbRegressor::new(weights(11.5)).unwrap();
        let input = crate::pipeline::normalize(&crate::domain::RawImage::new(
            "synthetic",
            image::DynamicImage::new_rgb8(32, 32),
        ));
        let value = model.predict(&input).unwrap();
        assert!((value - 11.5).abs() < 1e-6);
    }

    #[test]
    fn test_missing_weights_rejected() {
        let vb = VarBuilder::from_tensors(HashMap::new(), DType::F32, &Device::Cpu);
        assert!(HbRegressor::new(vb).is_err());
    }
}
