//! CLI command definitions and handlers.

pub mod analyze;
pub mod models;

use clap::{Parser, Subcommand};

/// hb-screen - palm-image anaemia screening
#[derive(Parser)]
#[command(name = "hb-screen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Estimate hemoglobin from a palm image and screen for anaemia
    Analyze(analyze::AnalyzeArgs),
    /// Manage the hemoglobin model
    Models(models::ModelsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Screening completed, hemoglobin in the normal range.
    Success = 0,
    /// Screening completed, subject classified anaemic.
    Anemic = 1,
    /// No result: bad input or an internal failure.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
