//! Offline batch valuation: prices every row of a listings CSV with the
//! same pipeline the HTTP service uses.

use anyhow::{Context, Result};
use bikeval::application::valuation_service::ValuationService;
use bikeval::config::{ArtifactEnvConfig, ModelBackend};
use bikeval::domain::ports::YearSource;
use bikeval::infrastructure::{FixedYear, SystemYear, load_artifacts};
use bikeval::interfaces::value_csv;
use clap::Parser;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the listings CSV, one listing per row with the seven request fields as headers
    #[arg(long)]
    input: PathBuf,

    /// Path to the priced CSV. Writes to stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Model artifact (defaults to MODEL_PATH)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Scaler artifact (defaults to SCALER_PATH)
    #[arg(long)]
    scaler: Option<PathBuf>,

    /// Label encoder artifact (defaults to LABEL_ENCODERS_PATH)
    #[arg(long)]
    encoders: Option<PathBuf>,

    /// Model backend override: smartcore or onnx
    #[arg(long)]
    backend: Option<ModelBackend>,

    /// Reference year for the age feature. Uses the current year when omitted.
    #[arg(long)]
    year: Option<i32>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout can carry the CSV
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let args = Args::parse();

    let mut artifacts = ArtifactEnvConfig::from_env()?;
    if let Some(model) = args.model {
        artifacts.model_path = model;
    }
    if let Some(scaler) = args.scaler {
        artifacts.scaler_path = scaler;
    }
    if let Some(encoders) = args.encoders {
        artifacts.label_encoders_path = encoders;
    }
    if args.backend.is_some() {
        artifacts.model_backend = args.backend;
    }

    let clock: Arc<dyn YearSource> = match args.year {
        Some(year) => Arc::new(FixedYear(year)),
        None => Arc::new(SystemYear),
    };
    let service = ValuationService::new(load_artifacts(&artifacts)?, clock);

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open {:?}", args.input))?;

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {:?}", path))?,
        ),
        None => Box::new(io::stdout()),
    };

    let summary = value_csv(&service, input, sink)?;
    info!(
        "Batch valuation done: {} priced, {} failed",
        summary.priced, summary.failed
    );
    Ok(())
}
