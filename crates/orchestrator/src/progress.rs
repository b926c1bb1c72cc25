//! Progress tracking

use drishti_common::EndpointRecord;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

/// Snapshot of the counters for one job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub total: usize,
    pub completed: usize,
    pub with_protocols: usize,
    pub unresolved: usize,
}

pub struct ProgressTracker {
    counts: Mutex<ScanSummary>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            counts: Mutex::new(ScanSummary::default()),
        }
    }

    /// Start a new job; previous counts are discarded.
    pub async fn reset(&self, total: usize) {
        *self.counts.lock().await = ScanSummary {
            total,
            ..ScanSummary::default()
        };
    }

    pub async fn record(&self, record: &EndpointRecord) {
        let mut counts = self.counts.lock().await;
        counts.completed += 1;
        if !record.protocols().is_empty() {
            counts.with_protocols += 1;
        }
        if !record.hostname().is_resolved() {
            counts.unresolved += 1;
        }
    }

    pub async fn summary(&self) -> ScanSummary {
        *self.counts.lock().await
    }

    pub async fn print_summary(&self, elapsed: Duration) {
        let counts = self.summary().await;

        info!("Scan Summary:");
        info!("  Total addresses: {}", counts.total);
        info!("  Completed: {}", counts.completed);
        info!("  With open protocols: {}", counts.with_protocols);
        info!("  Unresolved hostnames: {}", counts.unresolved);
        info!("  Elapsed: {}ms", elapsed.as_millis());
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}
