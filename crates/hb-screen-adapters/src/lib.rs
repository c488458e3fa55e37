//! hb-screen adapters - external adapters for hb-screen.
//!
//! This crate provides adapters for:
//! - Reading the palm image from the filesystem
//! - Locating and installing the hemoglobin model artifact

pub mod fs;
pub mod models;

pub use fs::FsImageSource;
pub use models::{default_models_dir, sha256_hex, ModelStore};
