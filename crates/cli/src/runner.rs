// runner.rs
use anyhow::Result;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use drishti_common::{EndpointRecord, ProtocolCatalog, ScanJob, ScanOptions};
use drishti_orchestrator::Orchestrator;
use drishti_scanner_tcp::EndpointScanner;
use drishti_target_resolver::TargetResolver;

use crate::args::Cli;
use crate::output::{render, write_output, ScanReport};

pub async fn run_scan(cli: Cli) -> Result<()> {
    let options = cli.scan_options()?;
    info!("Input: {}", cli.input.display());
    info!("Timeout: {}ms", options.timeout.as_millis());
    info!("Max workers: {}", options.max_workers);

    let report = scan_file(&cli.input, &options, ProtocolCatalog::default()).await?;

    let rendered = render(&report, cli.format)?;
    write_output(&rendered, cli.output.as_deref())?;
    Ok(())
}

/// Load the address list at `path` and scan every address in it.
pub async fn scan_file(
    path: &Path,
    options: &ScanOptions,
    catalog: ProtocolCatalog,
) -> Result<ScanReport> {
    let addresses = TargetResolver::load_addresses(path).await?;
    info!("Loaded {} address(es)", addresses.len());

    let scanner = EndpointScanner::from_options(options).with_catalog(catalog);
    let job = ScanJob::new(addresses);
    let job_id = job.id;

    let started_at = Utc::now();
    let records: Vec<EndpointRecord> = Orchestrator::new(Arc::new(scanner), options.max_workers)
        .run(job)
        .await?;
    let finished_at = Utc::now();

    Ok(ScanReport {
        job_id,
        started_at,
        finished_at,
        records,
    })
}
