mod args;
mod output;
mod runner;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

use args::Cli;
use drishti_common::DrishtiError;
use runner::run_scan;

/// Exit status when the address list does not exist.
const EXIT_INPUT_NOT_FOUND: u8 = 1;
/// Exit status for any other fatal error.
const EXIT_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run_scan(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<DrishtiError>() {
            Some(DrishtiError::InputNotFound(_)) => {
                eprintln!("{}", e);
                ExitCode::from(EXIT_INPUT_NOT_FOUND)
            }
            _ => {
                eprintln!("Error: {:#}", e);
                ExitCode::from(EXIT_FAILURE)
            }
        },
    }
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    // stdout carries the report
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
