//! Output formatting for scan reports

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use drishti_common::{EndpointRecord, Hostname};

use crate::args::OutputFormat;

const HEADERS: [&str; 4] = ["IP Address", "Hostname", "Protocols", "Endpoint Type"];

/// Records of one job plus timing metadata.
#[derive(Debug)]
pub struct ScanReport {
    pub job_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records: Vec<EndpointRecord>,
}

#[derive(Serialize)]
struct JsonEndpoint<'a> {
    address: &'a str,
    hostname: &'a Hostname,
    protocols: Vec<&'a str>,
    category: &'static str,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    job_id: Uuid,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    duration_ms: i64,
    total: usize,
    endpoints: Vec<JsonEndpoint<'a>>,
}

/// Render the report in `format`. No trailing newline.
pub fn render(report: &ScanReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(&report.records)),
        OutputFormat::Json => render_json(report),
        OutputFormat::Csv => Ok(render_csv(&report.records)),
    }
}

/// Write to `path` with a trailing newline, or print to stdout.
pub fn write_output(rendered: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => fs::write(path, format!("{}\n", rendered))
            .with_context(|| format!("Failed to write report to {}", path.display())),
        None => {
            println!("{}", rendered);
            Ok(())
        }
    }
}

fn table_row(record: &EndpointRecord) -> [String; 4] {
    [
        record.address().to_string(),
        record.hostname().to_string(),
        record.protocols().join(", "),
        record.category().label().to_string(),
    ]
}

/// Aligned table: header, dashed divider, one row per record in input order.
pub fn render_table(records: &[EndpointRecord]) -> String {
    let rows: Vec<[String; 4]> = records.iter().map(table_row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&HEADERS, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        lines.push(format_row(row, &widths));
    }
    lines.join("\n")
}

fn format_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = width))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_json(report: &ScanReport) -> Result<String> {
    let output = JsonReport {
        job_id: report.job_id,
        started_at: report.started_at,
        finished_at: report.finished_at,
        duration_ms: (report.finished_at - report.started_at).num_milliseconds(),
        total: report.records.len(),
        endpoints: report
            .records
            .iter()
            .map(|r| JsonEndpoint {
                address: r.address(),
                hostname: r.hostname(),
                protocols: r.protocols().iter().collect(),
                category: r.category().label(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn render_csv(records: &[EndpointRecord]) -> String {
    let mut lines = vec!["ip,hostname,protocols,endpoint_type".to_string()];
    for record in records {
        lines.push(
            [
                csv_field(record.address()),
                csv_field(record.hostname().as_str()),
                csv_field(&record.protocols().join(";")),
                csv_field(record.category().label()),
            ]
            .join(","),
        );
    }
    lines.join("\n")
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
