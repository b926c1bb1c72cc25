use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

use drishti_common::{DrishtiError, DrishtiResult, ScanOptions};

#[derive(Parser, Debug)]
#[command(name = "drishti")]
#[command(version = "0.1.0")]
#[command(
    about = "Scan IP endpoints for common protocols and identify likely device types",
    long_about = "Scan IP endpoints for common protocols and identify likely device types. \
                  Provide a text file with one IP address per line."
)]
pub struct Cli {
    /// Path to text file containing IP addresses
    pub input: PathBuf,

    /// Socket timeout (seconds) for each protocol probe and hostname lookup
    #[arg(long, default_value_t = 0.5)]
    pub timeout: f64,

    /// Maximum number of parallel scans
    #[arg(short, long, visible_alias = "max-workers", default_value_t = 32)]
    pub workers: usize,

    /// Optional path to write the report instead of printing to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// Pretty-printed JSON report
    Json,
    /// Comma-separated values
    Csv,
}

impl Cli {
    /// Validated scan options from the command line.
    pub fn scan_options(&self) -> DrishtiResult<ScanOptions> {
        if !(self.timeout > 0.0) {
            return Err(DrishtiError::Config(format!(
                "timeout must be a positive number of seconds, got {}",
                self.timeout
            )));
        }
        let timeout = Duration::try_from_secs_f64(self.timeout)
            .map_err(|e| DrishtiError::Config(format!("invalid timeout {}: {}", self.timeout, e)))?;
        if self.workers == 0 {
            return Err(DrishtiError::Config("workers must be at least 1".to_string()));
        }

        Ok(ScanOptions::default()
            .with_timeout(timeout)
            .with_max_workers(self.workers))
    }
}
