//! Image source port for obtaining the palm image of a request.

use crate::domain::ImageUpload;

/// Port for obtaining a palm image upload.
pub trait ImageSource: Send + Sync {
    /// Returns the upload, or `None` if the user supplied no image.
    ///
    /// # Errors
    ///
    /// Returns an error if an image was supplied but could not be read.
    fn upload(&self) -> anyhow::Result<Option<ImageUpload>>;
}
