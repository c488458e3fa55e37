//! Model store: where the hemoglobin regressor artifact lives.

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Model metadata.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model name/identifier.
    pub name: &'static str,
    /// Filename in models directory.
    pub filename: &'static str,
    /// What the model does.
    pub description: &'static str,
}

/// The hemoglobin regressor.
pub const HB_REGRESSOR: ModelInfo = ModelInfo {
    name: "hb_regressor",
    filename: "hb_regressor.safetensors",
    description: "palm image -> hemoglobin (g/dL) CNN regressor",
};

/// Known models.
pub const MODELS: &[ModelInfo] = &[HB_REGRESSOR];

/// Returns the default models directory path.
///
/// Uses `XDG_DATA_HOME/hb-screen/models` or `~/.local/share/hb-screen/models`.
#[must_use]
pub fn default_models_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hb-screen")
        .join("models")
}

/// A directory holding model artifacts.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl Default for ModelStore {
    fn default() -> Self {
        Self::new(default_models_dir())
    }
}

impl ModelStore {
    /// Creates a store rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the hemoglobin regressor artifact.
    #[must_use]
    pub fn regressor_path(&self) -> PathBuf {
        self.dir.join(HB_REGRESSOR.filename)
    }

    /// Lists known models with their installed status.
    #[must_use]
    pub fn list(&self) -> Vec<(&'static ModelInfo, bool)> {
        MODELS
            .iter()
            .map(|m| (m, self.dir.join(m.filename).exists()))
            .collect()
    }

    /// Copies a trained artifact into the store as the regressor.
    ///
    /// Returns the installed path and the file's SHA-256. When `expected`
    /// is given the digest must match or nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source file cannot be read
    /// - The digest doesn't match `expected`
    /// - The models directory cannot be created or written
    pub fn install(&self, source: &Path, expected: Option<&str>) -> Result<(PathBuf, String)> {
        let bytes = fs::read(source)
            .with_context(|| format!("Failed to read model file {}", source.display()))?;
        let digest = sha256_hex(&bytes);

        if let Some(expected) = expected {
            if !digest.eq_ignore_ascii_case(expected.trim()) {
                bail!(
                    "Checksum mismatch for {}: expected {}, got {}",
                    source.display(),
                    expected.trim(),
                    digest
                );
            }
            debug!("Checksum verified for {}", source.display());
        }

        fs::create_dir_all(&self.dir).context("Failed to create models directory")?;
        let target = self.regressor_path();
        fs::write(&target, &bytes)
            .with_context(|| format!("Failed to write {}", target.display()))?;

        info!("Installed {} ({} bytes)", target.display(), bytes.len());
        Ok((target, digest))
    }
}

/// Hex-encoded SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
