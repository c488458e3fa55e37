//! Analyze command - screen a palm image for anaemia.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, ValueEnum};
use hb_screen_adapters::{FsImageSource, ModelStore};
use hb_screen_core::inference::{select_device, DEFAULT_TIMEOUT};
use hb_screen_core::{
    AnalyzeRequest, Analyzer, EngineConfig, Error, ImageSource, InferenceEngine, ResultOutput,
    SafetensorsLoader, Sex, Status, Subject,
};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressSpinner, TextOutput};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON document
    #[default]
    Json,
    /// Human-readable report
    Text,
}

/// Sex of the screened subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SexArg {
    /// Male (threshold 13.0 g/dL)
    Male,
    /// Female (threshold 12.0 g/dL)
    Female,
}

impl From<SexArg> for Sex {
    fn from(arg: SexArg) -> Self {
        match arg {
            SexArg::Male => Self::Male,
            SexArg::Female => Self::Female,
        }
    }
}

/// Parse and validate an age in years (1-120).
fn parse_age(s: &str) -> Result<u8, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid age"))?;
    if (1..=120).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 1..=120"))
    }
}

/// Parse a positive millisecond budget.
fn parse_timeout(s: &str) -> Result<u64, String> {
    match s.parse::<u64>() {
        Ok(0) => Err("timeout must be greater than 0".to_string()),
        Ok(ms) => Ok(ms),
        Err(_) => Err(format!("'{s}' is not a valid number of milliseconds")),
    }
}

/// Arguments for a screening run.
#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Palm image (jpg, jpeg or png)
    #[arg(short, long, value_name = "PATH")]
    pub image: Option<PathBuf>,

    /// Sex of the subject
    #[arg(short, long, value_enum)]
    pub sex: SexArg,

    /// Name of the subject
    #[arg(long)]
    pub name: Option<String>,

    /// Age of the subject in years
    #[arg(long, value_parser = parse_age)]
    pub age: Option<u8>,

    /// City or area, used to suggest nearby clinics
    #[arg(short, long)]
    pub location: Option<String>,

    /// Model artifact (overrides models directory and config)
    #[arg(long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR")]
    pub models_dir: Option<PathBuf>,

    /// Forward-pass budget in milliseconds
    #[arg(long, value_name = "MS", value_parser = parse_timeout)]
    pub timeout_ms: Option<u64>,

    /// Seed for fallback estimates
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run inference on the CPU even if a GPU is available
    #[arg(long)]
    pub cpu: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Show progress spinner
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl AnalyzeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if args.location.is_none() {
            args.location.clone_from(&config.subject.location);
        }

        if args.model.is_none() {
            args.model.clone_from(&config.models.path);
        }
        if args.models_dir.is_none() {
            args.models_dir.clone_from(&config.models.dir);
        }

        args.timeout_ms = args.timeout_ms.or(config.inference.timeout_ms);
        args.seed = args.seed.or(config.inference.fallback_seed);
        if !args.cpu {
            args.cpu = config.inference.force_cpu.unwrap_or(false);
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_deref()
                .and_then(|s| OutputFormat::from_str(s, true).ok());
        }
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Model artifact: explicit path, else the regressor in the models directory.
    fn model_path(&self) -> PathBuf {
        self.model.clone().unwrap_or_else(|| {
            self.models_dir
                .clone()
                .map_or_else(ModelStore::default, ModelStore::new)
                .regressor_path()
        })
    }

    fn timeout(&self) -> Duration {
        self.timeout_ms.map_or(DEFAULT_TIMEOUT, Duration::from_millis)
    }

    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    fn subject(&self) -> Subject {
        Subject {
            name: self.name.clone(),
            age: self.age,
            sex: self.sex.into(),
        }
    }
}

/// Run the analyze command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &AnalyzeArgs) -> Result<ExitCode> {
    let image = FsImageSource::new(args.image.clone()).upload()?;

    let model_path = args.model_path();
    debug!("Model artifact: {}", model_path.display());
    let loader = SafetensorsLoader::new(Some(model_path), select_device(args.cpu));
    let engine = InferenceEngine::new(
        loader,
        EngineConfig {
            timeout: args.timeout(),
            fallback_seed: args.seed,
        },
    );

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let spinner = ProgressSpinner::new(show_progress);

    let request = AnalyzeRequest {
        image,
        subject: args.subject(),
        location: args.location.clone().unwrap_or_default(),
    };

    let result = match Analyzer::new(&engine).with_progress(&spinner).analyze(request) {
        Ok(result) => result,
        Err(Error::NoImage) => {
            eprintln!("warning: Please provide a palm image (--image) to continue.");
            return Ok(ExitCode::Error);
        }
        Err(e) => return Err(e.into()),
    };

    let output: Box<dyn ResultOutput> = match args.format() {
        OutputFormat::Json => Box::new(JsonOutput::stdout(args.pretty)),
        OutputFormat::Text => Box::new(TextOutput::stdout()),
    };
    output.present(&result)?;
    output.flush()?;

    info!(
        "{}: {} g/dL, {}",
        result.source,
        result.hemoglobin.value(),
        result.status
    );

    Ok(match result.status {
        Status::Anemic => ExitCode::Anemic,
        Status::Normal => ExitCode::Success,
    })
}
