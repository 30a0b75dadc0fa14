use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use techstack::commands::update;
use techstack::config::{Config, LoggingConfig};
use techstack::error::Result;

/// Exit code for invocation errors
const EXIT_USAGE: u8 = 1;

/// Exit code for runtime failures (unreadable report, dataset I/O)
const EXIT_FAILURE: u8 = 1;

/// Exit code when the report matches neither known layout
const EXIT_UNRECOGNIZED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "techstack",
    version,
    about = "Merge technologies from a saved detection report into a CSV dataset",
    long_about = None
)]
struct Cli {
    /// Saved HTML report (free or detailed view)
    report: PathBuf,

    /// Dataset CSV to update
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long)]
    log_format: Option<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let informational =
                matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion);
            let _ = e.print();
            return if informational {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(EXIT_USAGE)
            };
        }
    };

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if let Err(e) = setup_tracing(&config.logging, cli.verbose) {
        eprintln!("Error: failed to initialize logging: {e}");
        return ExitCode::from(EXIT_FAILURE);
    }

    tracing::debug!(
        report = %cli.report.display(),
        dataset = %config.dataset.path.display(),
        "Starting update"
    );

    match update(&cli.report, &config.dataset.path) {
        Ok(outcome) => {
            println!("{}", outcome.message());
            ExitCode::SUCCESS
        }
        Err(e) if e.is_unrecognized_report() => {
            println!("Error: Not a recognized report.");
            ExitCode::from(EXIT_UNRECOGNIZED)
        }
        Err(e) => {
            tracing::error!(category = e.category().as_str(), error = %e, "Update failed");
            eprintln!("Error: {e}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Resolve configuration: config file or environment, then CLI flags
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };

    if let Some(dataset) = &cli.dataset {
        config.dataset.path = dataset.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }

    config.validate()?;
    Ok(config)
}

fn setup_tracing(logging: &LoggingConfig, verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("techstack={level},warn")));

    // stdout is reserved for the result message
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.json())
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.pretty())
                .try_init()?;
        }
    }

    Ok(())
}
