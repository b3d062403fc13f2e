use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use capital_gains::cli::{runner, Cli};
use capital_gains::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Initialize logging on stderr; stdout carries only results
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .context("invalid logging filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let policy = cli.on_error.unwrap_or(config.processing.on_error);
    let stdout = io::stdout().lock();

    let summary = match cli.input {
        Some(ref path) => {
            info!("Reading operations from: {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("failed to open input file {}", path.display()))?;
            runner::run(BufReader::new(file), stdout, policy)?
        }
        None => runner::run(io::stdin().lock(), stdout, policy)?,
    };

    info!(
        "Processed {} operations in {} batches",
        summary.operations, summary.batches
    );
    Ok(())
}
