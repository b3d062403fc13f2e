use clap::Parser;
use std::path::PathBuf;

use crate::config::ErrorPolicy;

pub mod runner;

#[derive(Parser, Debug)]
#[command(name = "capital-gains")]
#[command(
    version,
    about = "Capital-gains tax calculator for Brazilian stock trades"
)]
#[command(
    long_about = "Reads one JSON array of buy/sell operations per line and writes one JSON array of {\"tax\": ...} results per line. Each line is an independent position: average cost, shares and accumulated loss start at zero."
)]
pub struct Cli {
    /// Read operations from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Configuration file (defaults to <config dir>/capital-gains/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// What to do when an operation is rejected: abort or skip
    #[arg(long = "on-error", value_parser = parse_policy)]
    pub on_error: Option<ErrorPolicy>,
}

fn parse_policy(s: &str) -> Result<ErrorPolicy, String> {
    s.parse::<ErrorPolicy>().map_err(|e| e.to_string())
}
