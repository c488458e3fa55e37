//! Configuration file support for hb-screen.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/hb-screen/config.toml` (lowest priority)
//! - Project-local: `.hb-screen.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = ".hb-screen.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model artifact location.
    pub models: ModelsConfig,
    /// Inference engine tuning.
    pub inference: InferenceConfig,
    /// Defaults for the screened subject.
    pub subject: SubjectConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Model configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    /// Custom models directory path.
    pub dir: Option<PathBuf>,
    /// Explicit regressor artifact path (overrides `dir`).
    pub path: Option<PathBuf>,
}

/// Inference configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Forward-pass budget in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Seed for fallback estimates.
    pub fallback_seed: Option<u64>,
    /// Skip GPU detection.
    pub force_cpu: Option<bool>,
}

/// Subject defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SubjectConfig {
    /// Location used for clinic search when none is given.
    pub location: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "text".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress spinner.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/hb-screen/config.toml`
    /// 2. Project-local: `.hb-screen.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if self.inference.timeout_ms == Some(0) {
            return Err("inference.timeout_ms must be greater than 0".to_string());
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "text" {
                return Err(format!("output.format must be 'json' or 'text', got '{f}'"));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.models.dir = other.models.dir.or_else(|| self.models.dir.take());
        self.models.path = other.models.path.or_else(|| self.models.path.take());

        self.inference.timeout_ms = other.inference.timeout_ms.or(self.inference.timeout_ms);
        self.inference.fallback_seed = other
            .inference
            .fallback_seed
            .or(self.inference.fallback_seed);
        self.inference.force_cpu = other.inference.force_cpu.or(self.inference.force_cpu);

        self.subject.location = other
            .subject
            .location
            .or_else(|| self.subject.location.take());

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hb-screen").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.hb-screen.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG_FILE))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.models.dir.is_none());
        assert!(config.inference.timeout_ms.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.subject.location.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[models]
dir = '/opt/hb/models'
path = '/opt/hb/custom.safetensors'

[inference]
timeout_ms = 1500
fallback_seed = 42
force_cpu = true

[subject]
location = 'Mysuru'

[output]
format = 'text'
pretty = true
progress = false
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.models.dir, Some(PathBuf::from("/opt/hb/models")));
        assert_eq!(
            config.models.path,
            Some(PathBuf::from("/opt/hb/custom.safetensors"))
        );
        assert_eq!(config.inference.timeout_ms, Some(1500));
        assert_eq!(config.inference.fallback_seed, Some(42));
        assert_eq!(config.inference.force_cpu, Some(true));
        assert_eq!(config.subject.location.as_deref(), Some("Mysuru"));
        assert_eq!(config.output.format.as_deref(), Some("text"));
        assert_eq!(config.output.pretty, Some(true));
        assert_eq!(config.output.progress, Some(false));
    }

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r"
[inference]
timeout_ms = 1000
fallback_seed = 1

[subject]
location = 'Kolkata'
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[inference]
timeout_ms = 2000

[output]
format = 'json'
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.inference.timeout_ms, Some(2000));
        assert_eq!(base.inference.fallback_seed, Some(1));
        assert_eq!(base.subject.location.as_deref(), Some("Kolkata"));
        assert_eq!(base.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[models]
dir = '/data/models'
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.models.dir, Some(PathBuf::from("/data/models")));
    }

    #[test]
    fn test_invalid_field_type_handled() {
        let toml = r#"
[inference]
timeout_ms = "soon"
"#;
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "type mismatch should return error");
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = AppConfig::default();
        config.inference.timeout_ms = Some(0);
        assert!(config.validate().unwrap_err().contains("inference.timeout_ms"));
    }

    #[test]
    fn test_validate_output_format_invalid() {
        let mut config = AppConfig::default();
        config.output.format = Some("xml".to_string());
        assert!(config.validate().unwrap_err().contains("output.format"));
    }

    #[test]
    fn test_validate_empty_config_passes() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_find_config_in_parents() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(PROJECT_CONFIG_FILE), "").unwrap();

        let found = find_config_in_parents(&nested).unwrap();
        assert_eq!(found, root.path().join(PROJECT_CONFIG_FILE));
    }
}
