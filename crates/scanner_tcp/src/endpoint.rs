//! Per-address scan dispatch
//!
//! Runs every catalog probe plus the reverse lookup for one address and turns
//! the outcome into an `EndpointRecord`. Probes for the same address run
//! concurrently, so one address costs at most one timeout.

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

use drishti_common::{
    AddressScanner, DetectionSet, EndpointRecord, HostnameResolver, Prober, ProtocolCatalog,
    ScanOptions,
};
use drishti_fingerprint::classify;
use drishti_target_resolver::ReverseResolver;

use crate::scanner::TcpProber;

pub struct EndpointScanner {
    prober: Arc<dyn Prober>,
    resolver: Arc<dyn HostnameResolver>,
    catalog: ProtocolCatalog,
    timeout: Duration,
}

impl EndpointScanner {
    /// Scanner over the default catalog with the given collaborators.
    pub fn new(
        prober: Arc<dyn Prober>,
        resolver: Arc<dyn HostnameResolver>,
        timeout: Duration,
    ) -> Self {
        Self {
            prober,
            resolver,
            catalog: ProtocolCatalog::default(),
            timeout,
        }
    }

    /// TCP connect probes and system reverse DNS, both bounded by `options.timeout`.
    pub fn from_options(options: &ScanOptions) -> Self {
        Self::new(
            Arc::new(TcpProber::new()),
            Arc::new(ReverseResolver::new(options.timeout)),
            options.timeout,
        )
    }

    /// Replace the probe catalog.
    pub fn with_catalog(mut self, catalog: ProtocolCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &ProtocolCatalog {
        &self.catalog
    }

    async fn detect_protocols(&self, address: &str) -> DetectionSet {
        let checks = self.catalog.probes().iter().map(|probe| async move {
            let open = self.prober.check(address, probe.port, self.timeout).await;
            open.then(|| probe.name.clone())
        });
        join_all(checks).await.into_iter().flatten().collect()
    }
}

#[async_trait]
impl AddressScanner for EndpointScanner {
    #[instrument(skip(self))]
    async fn scan_one(&self, address: &str) -> EndpointRecord {
        let (protocols, hostname) =
            tokio::join!(self.detect_protocols(address), self.resolver.resolve(address));
        let category = classify(&protocols);
        debug!(
            hostname = %hostname,
            protocols = %protocols.join(","),
            %category,
            "Scanned endpoint"
        );
        EndpointRecord::new(address.to_string(), hostname, protocols, category)
    }

    fn name(&self) -> &str {
        "TCP Endpoint Scanner"
    }
}
