// crates/orchestrator/src/orchestrator.rs
//! Orchestrator - worker pool over an indexed address queue

use anyhow::{anyhow, Result};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use drishti_common::{AddressScanner, EndpointRecord, ScanJob};
use crate::progress::ProgressTracker;

/// Runs one scanner over many addresses with at most `max_workers` in flight.
///
/// Results are written into a slot per input index, so the returned records
/// always follow input order regardless of completion order.
pub struct Orchestrator {
    scanner: Arc<dyn AddressScanner>,
    max_workers: usize,
    progress: Arc<ProgressTracker>,
}

impl Orchestrator {
    pub fn new(scanner: Arc<dyn AddressScanner>, max_workers: usize) -> Self {
        Self {
            scanner,
            max_workers: max_workers.max(1),
            progress: Arc::new(ProgressTracker::new()),
        }
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// Scan `addresses` and return one record per address, in input order.
    pub async fn scan_all(&self, addresses: Vec<String>) -> Result<Vec<EndpointRecord>> {
        self.run(ScanJob::new(addresses)).await
    }

    #[instrument(skip(self, job), fields(job_id = %job.id))]
    pub async fn run(&self, job: ScanJob) -> Result<Vec<EndpointRecord>> {
        let total = job.address_count();
        let workers = self.max_workers.min(total);
        info!(
            "Starting job {} addresses={} workers={} scanner={}",
            job.id,
            total,
            workers,
            self.scanner.name()
        );
        self.progress.reset(total).await;
        let started = Instant::now();

        let queue: VecDeque<(usize, String)> = job.addresses.into_iter().enumerate().collect();
        let queue = Arc::new(Mutex::new(queue));
        let slots = Arc::new(Mutex::new(vec![None::<EndpointRecord>; total]));

        let mut handles = Vec::with_capacity(workers);
        for _ in 0..workers {
            let queue = queue.clone();
            let slots = slots.clone();
            let scanner = self.scanner.clone();
            let progress = self.progress.clone();

            handles.push(tokio::spawn(async move {
                loop {
                    let next = queue.lock().await.pop_front();
                    let (index, address) = match next {
                        Some(item) => item,
                        None => break,
                    };

                    let record = scanner.scan_one(&address).await;
                    progress.record(&record).await;
                    slots.lock().await[index] = Some(record);
                }
            }));
        }

        for handle in handles {
            handle.await?;
        }

        self.progress.print_summary(started.elapsed()).await;

        let slots = std::mem::take(&mut *slots.lock().await);
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or_else(|| anyhow!("No record for address #{}", index)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use drishti_common::{DetectionSet, EndpointCategory, Hostname};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn record_for(address: &str) -> EndpointRecord {
        EndpointRecord::new(
            address.to_string(),
            Hostname::Unresolved,
            DetectionSet::new(),
            EndpointCategory::Unknown,
        )
    }

    /// Earlier addresses take longer, so completion order is reversed.
    struct ReverseDelayScanner {
        total: usize,
    }

    #[async_trait]
    impl AddressScanner for ReverseDelayScanner {
        async fn scan_one(&self, address: &str) -> EndpointRecord {
            let index: usize = address.rsplit('.').next().unwrap().parse().unwrap();
            let delay = (self.total - index) as u64 * 5;
            tokio::time::sleep(Duration::from_millis(delay)).await;
            record_for(address)
        }

        fn name(&self) -> &str {
            "reverse-delay"
        }
    }

    /// Tracks how many scans run at the same time.
    #[derive(Default)]
    struct CountingScanner {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AddressScanner for CountingScanner {
        async fn scan_one(&self, address: &str) -> EndpointRecord {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(15)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            record_for(address)
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn addresses(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("10.0.0.{}", i)).collect()
    }

    #[tokio::test]
    async fn preserves_input_order() {
        let n = 12;
        let orch = Orchestrator::new(Arc::new(ReverseDelayScanner { total: n }), 4);

        let input = addresses(n);
        let records = orch.scan_all(input.clone()).await.unwrap();

        let output: Vec<_> = records.iter().map(|r| r.address().to_string()).collect();
        assert_eq!(output, input);
    }

    #[tokio::test]
    async fn preserves_order_with_one_worker_per_address() {
        let n = 8;
        let orch = Orchestrator::new(Arc::new(ReverseDelayScanner { total: n }), 32);

        let input = addresses(n);
        let records = orch.scan_all(input.clone()).await.unwrap();

        assert_eq!(records.len(), n);
        for (record, address) in records.iter().zip(&input) {
            assert_eq!(record.address(), address);
        }
    }

    #[tokio::test]
    async fn respects_worker_cap() {
        let scanner = Arc::new(CountingScanner::default());
        let orch = Orchestrator::new(scanner.clone(), 3);

        let records = orch.scan_all(addresses(20)).await.unwrap();

        assert_eq!(records.len(), 20);
        assert_eq!(scanner.calls.load(Ordering::SeqCst), 20);
        let peak = scanner.peak.load(Ordering::SeqCst);
        assert!(peak >= 1 && peak <= 3, "peak concurrency was {}", peak);
    }

    #[tokio::test]
    async fn zero_workers_clamped_to_one() {
        let scanner = Arc::new(CountingScanner::default());
        let orch = Orchestrator::new(scanner.clone(), 0);

        let records = orch.scan_all(addresses(3)).await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(scanner.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_input_returns_empty() {
        let orch = Orchestrator::new(Arc::new(CountingScanner::default()), 4);
        let records = orch.scan_all(Vec::new()).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn duplicate_addresses_each_get_a_record() {
        let orch = Orchestrator::new(Arc::new(CountingScanner::default()), 2);
        let input = vec!["10.0.0.1".to_string(), "10.0.0.1".to_string()];
        let records = orch.scan_all(input).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn progress_counts_every_address() {
        let orch = Orchestrator::new(Arc::new(CountingScanner::default()), 4);
        orch.scan_all(addresses(6)).await.unwrap();

        let summary = orch.progress().summary().await;
        assert_eq!(summary.total, 6);
        assert_eq!(summary.completed, 6);
        assert_eq!(summary.unresolved, 6);
    }
}
