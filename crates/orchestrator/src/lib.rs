//! Orchestrator - bounded fan-out of address scans with ordered fan-in

mod orchestrator;
mod progress;

pub use orchestrator::Orchestrator;
pub use progress::{ProgressTracker, ScanSummary};
