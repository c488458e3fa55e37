//! Filesystem adapter for loading the palm image.

use anyhow::{bail, Context, Result};
use hb_screen_core::{ImageSource, ImageUpload};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported image extensions.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Filesystem image source adapter.
///
/// Holds an optional path; no path means the user supplied no image.
pub struct FsImageSource {
    path: Option<PathBuf>,
}

impl FsImageSource {
    /// Creates a source for the image at `path`, if any.
    #[must_use]
    pub const fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

impl ImageSource for FsImageSource {
    fn upload(&self) -> Result<Option<ImageUpload>> {
        let Some(path) = &self.path else {
            debug!("No image path given");
            return Ok(None);
        };
        load_upload(path).map(Some)
    }
}

/// Checks if a path has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// Reads an image file into an upload without decoding it.
fn load_upload(path: &Path) -> Result<ImageUpload> {
    if !is_supported_image(path) {
        bail!(
            "Unsupported file type: {} (expected one of: {})",
            path.display(),
            SUPPORTED_EXTENSIONS.join(", ")
        );
    }

    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read image: {}", path.display()))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(ImageUpload::new(path.to_string_lossy(), bytes))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("palm.jpg")));
        assert!(is_supported_image(Path::new("palm.JPEG")));
        assert!(is_supported_image(Path::new("palm.png")));
        assert!(!is_supported_image(Path::new("palm.tiff")));
        assert!(!is_supported_image(Path::new("palm.txt")));
        assert!(!is_supported_image(Path::new("palm")));
    }

    #[test]
    fn test_no_path_is_no_image() {
        let source = FsImageSource::new(None);
        assert!(matches!(source.upload(), Ok(None)));
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let source = FsImageSource::new(Some(PathBuf::from("notes.txt")));
        let err = source.upload().unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }
}
