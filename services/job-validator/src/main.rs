//! Job validator CLI.
//!
//! Validates a JSON array of job submissions against CMR and the DEM
//! coverage reference, or reports the coverage decision for a bounding box.
//!
//! Exit codes: 0 admissible, 1 rejected, 2 infrastructure failure.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use cmr_client::HttpCmrClient;
use dem_coverage::CoverageReference;
use granule_common::{BoundingBox, Footprint, Job};
use job_validator::{JobValidator, ValidationError, ValidatorConfig};

#[derive(Parser, Debug)]
#[command(name = "job-validator")]
#[command(about = "Check granule processing job submissions before they are queued")]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short, long, env = "VALIDATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Jobs file (JSON array); reads stdin when omitted
    #[arg(value_name = "JOBS")]
    jobs: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report DEM coverage for a bounding box
    Coverage {
        /// west,south,east,north in degrees
        #[arg(long, allow_hyphen_values = true)]
        bbox: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let result = match &args.command {
        Some(Command::Coverage { bbox }) => run_coverage(&args, bbox),
        None => run_validate(&args).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("Job validator failed: {e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run_validate(args: &Args) -> Result<ExitCode> {
    let config = ValidatorConfig::load(args.config.as_deref())?;
    let jobs = read_jobs(args.jobs.as_ref())?;
    info!(jobs = jobs.len(), "Validating job submission");

    let reference = CoverageReference::load(&config.coverage.reference_path)?;
    let cmr = HttpCmrClient::new(config.cmr.clone())?;
    let validator = JobValidator::new(Arc::new(cmr), Arc::new(reference))
        .with_params(config.coverage.params);

    match validator.validate(&jobs).await {
        Ok(()) => {
            println!("OK");
            Ok(ExitCode::SUCCESS)
        }
        Err(ValidationError::Granules(e)) => {
            println!("{e}");
            Ok(ExitCode::from(1))
        }
        Err(e) => Err(e.into()),
    }
}

fn run_coverage(args: &Args, bbox: &str) -> Result<ExitCode> {
    let config = ValidatorConfig::load(args.config.as_deref())?;
    let bbox = BoundingBox::from_wsen_string(bbox)?;
    let footprint = Footprint::rectangle(bbox.max_y, bbox.min_y, bbox.max_x, bbox.min_x);

    let reference = CoverageReference::load(&config.coverage.reference_path)?;
    let params = config.coverage.params;
    let ratio = reference.coverage_ratio(&footprint, params.buffer);
    let sufficient = reference.has_sufficient_coverage(&footprint, &params);

    println!(
        "coverage ratio {ratio:.4} (buffer {}, threshold {}): {}",
        params.buffer,
        params.threshold,
        if sufficient { "sufficient" } else { "insufficient" }
    );
    Ok(if sufficient {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn read_jobs(path: Option<&PathBuf>) -> Result<Vec<Job>> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read jobs: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read jobs from stdin")?;
            buf
        }
    };
    serde_json::from_str(&content).context("Failed to parse jobs")
}
