//! Test support utilities for hb-screen.
//!
//! Provides mocks for the core ports and model seams, synthetic palm image
//! builders, and a writer for regressor weight files.
//!
//! # Example
//!
//! ```
//! use hb_screen_test_support::{MockLoader, SyntheticImageBuilder};
//!
//! // A pale palm, encoded as a PNG upload
//! let upload = SyntheticImageBuilder::pale_palm(64, 64).png_upload("palm.png");
//!
//! // A loader whose model always answers 0.115
//! let loader = MockLoader::fixed(0.115);
//! ```

mod builders;
mod fixtures;
mod mocks;

pub use builders::{SyntheticImage, SyntheticImageBuilder};
pub use fixtures::{regressor_safetensors, write_regressor_safetensors};
pub use mocks::{MockImageSource, MockLoader, MockModel, MockProgressSink, MockResultOutput};
