//! Models command - manage the hemoglobin model artifact.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use hb_screen_adapters::ModelStore;

use crate::config::AppConfig;

/// Arguments for the models command
#[derive(Args)]
pub struct ModelsArgs {
    /// Custom models directory (overrides default and config)
    #[arg(long, value_name = "DIR", global = true)]
    pub models_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ModelsCommand,
}

/// Models subcommands
#[derive(Subcommand)]
pub enum ModelsCommand {
    /// List known models and whether they are installed
    List,
    /// Print model directory path
    Path,
    /// Copy a trained artifact into the models directory
    Install {
        /// Safetensors file to install
        file: PathBuf,

        /// Expected SHA-256 of the file (hex)
        #[arg(long, value_name = "HEX")]
        sha256: Option<String>,
    },
}

/// Run the models command.
pub fn run(args: &ModelsArgs, config: &AppConfig) -> Result<()> {
    let store = args
        .models_dir
        .clone()
        .or_else(|| config.models.dir.clone())
        .map_or_else(ModelStore::default, ModelStore::new);

    match &args.command {
        ModelsCommand::List => {
            list_models(&store);
            Ok(())
        }
        ModelsCommand::Path => {
            println!("{}", store.dir().display());
            Ok(())
        }
        ModelsCommand::Install { file, sha256 } => {
            let (path, digest) = store.install(file, sha256.as_deref())?;
            println!("Installed {}", path.display());
            println!("sha256: {digest}");
            Ok(())
        }
    }
}

fn list_models(store: &ModelStore) {
    let models = store.list();

    println!("Models directory: {}", store.dir().display());
    println!();

    for (info, installed) in &models {
        let status = if *installed { "✓" } else { "✗" };
        println!(
            "  {status} {} ({}) - {}",
            info.name, info.filename, info.description
        );
    }

    println!();
    let installed_count = models.iter().filter(|(_, installed)| *installed).count();
    println!("{}/{} models installed", installed_count, models.len());
    if installed_count < models.len() {
        println!("Estimates fall back to placeholder values until the model is installed.");
    }
}
