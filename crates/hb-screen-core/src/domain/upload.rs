//! Uploaded and decoded palm images.

use image::GenericImageView;
use tracing::debug;

use crate::error::{Error, Result};

/// Encoded image bytes as received from an upload or camera capture.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Where the bytes came from (file path, `camera`, ...).
    pub source: String,
    /// Encoded image data (JPEG, PNG, ...).
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Creates an upload from a source label and encoded bytes.
    #[must_use]
    pub fn new(source: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            bytes,
        }
    }
}

/// A decoded palm image, read-only to the pipeline.
#[derive(Debug, Clone)]
pub struct RawImage {
    /// Source label carried over from the upload.
    pub source: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded image data.
    pub image: image::DynamicImage,
}

impl RawImage {
    /// Wraps an already decoded image.
    #[must_use]
    pub fn new(source: impl Into<String>, image: image::DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            source: source.into(),
            width,
            height,
            image,
        }
    }

    /// Decodes an upload, guessing the format from its magic bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the bytes are not a supported image.
    pub fn decode(upload: &ImageUpload) -> Result<Self> {
        let image = image::load_from_memory(&upload.bytes).map_err(|source| Error::Decode {
            source_name: upload.source.clone(),
            source,
        })?;
        let raw = Self::new(upload.source.clone(), image);
        debug!("Decoded {} ({}x{})", raw.source, raw.width, raw.height);
        Ok(raw)
    }
}
