//! run-model - Main Entry Point
//!
//! Loads the trained classifier, scores one feature vector given on the
//! command line, and prints the prediction as JSON.

use anyhow::Result;
use clap::Parser;
use run_model::config::{AppConfig, LoggingConfig};
use std::io;
use std::path::PathBuf;
use std::process;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Run the trained classifier on a single feature vector
#[derive(Parser, Debug)]
#[command(name = "run-model", version, about, long_about = None)]
struct Cli {
    /// Path to input JSON file OR comma-separated values (e.g. 5.1,3.5,1.4,0.2)
    #[arg(long)]
    input: String,

    /// Configuration file [default: config/config.toml, if present]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Model artifact to load instead of the configured one
    #[arg(long, value_name = "PATH")]
    model: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        error!(error = %e, "Prediction failed");
        println!("ERROR: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    if let Some(model) = &cli.model {
        config = config.with_model_path(model);
    }

    init_logging(&config.logging)?;
    debug!(model = %config.model.path.display(), input = %cli.input, "Configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_model::run(&config, &cli.input, &mut out)?;

    Ok(())
}

/// Structured logs go to stderr; stdout carries only the prediction output
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
