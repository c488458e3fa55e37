//! Image normalization into the model's input tensor.
//!
//! The model consumes a single 224x224 RGB frame scaled to `[0, 1]`, laid
//! out NHWC with a batch axis of one.

#![allow(clippy::cast_possible_truncation)]

use candle_core::{Device, Tensor};
use image::imageops::FilterType;

use crate::domain::RawImage;

/// Side length of the square model input.
pub const INPUT_SIZE: usize = 224;
/// Colour channels in the model input.
pub const CHANNELS: usize = 3;
/// Logical tensor shape: batch, height, width, channels.
pub const TENSOR_SHAPE: [usize; 4] = [1, INPUT_SIZE, INPUT_SIZE, CHANNELS];

/// Fixed-shape model input derived from a [`RawImage`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTensor {
    data: Vec<f32>,
}

impl NormalizedTensor {
    /// Returns the logical shape `[1, 224, 224, 3]`.
    #[must_use]
    pub const fn shape(&self) -> [usize; 4] {
        TENSOR_SHAPE
    }

    /// Returns the values in NHWC order.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Value at `(y, x, channel)` of the single batch entry.
    #[must_use]
    pub fn get(&self, y: usize, x: usize, channel: usize) -> Option<f32> {
        if y >= INPUT_SIZE || x >= INPUT_SIZE || channel >= CHANNELS {
            return None;
        }
        self.data.get((y * INPUT_SIZE + x) * CHANNELS + channel).copied()
    }

    /// Copies the values into a candle tensor of shape `(1, 224, 224, 3)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tensor cannot be allocated on `device`.
    pub fn to_tensor(&self, device: &Device) -> candle_core::Result<Tensor> {
        Tensor::from_vec(
            self.data.clone(),
            (1, INPUT_SIZE, INPUT_SIZE, CHANNELS),
            device,
        )
    }
}

/// Resizes an image to 224x224 RGB and scales every channel by `1/255`.
///
/// Alpha is dropped and grayscale is expanded so any decodable image yields
/// three channels. Resampling is bicubic.
#[must_use]
pub fn normalize(image: &RawImage) -> NormalizedTensor {
    let resized = image.image.resize_exact(
        INPUT_SIZE as u32,
        INPUT_SIZE as u32,
        FilterType::CatmullRom,
    );
    let rgb = resized.to_rgb8();

    let data: Vec<f32> = rgb
        .pixels()
        .flat_map(|p| {
            [
                f32::from(p[0]) / 255.0,
                f32::from(p[1]) / 255.0,
                f32::from(p[2]) / 255.0,
            ]
        })
        .collect();

    debug_assert_eq!(data.len(), INPUT_SIZE * INPUT_SIZE * CHANNELS);
    NormalizedTensor { data }
}
