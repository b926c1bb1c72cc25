//! Core traits for Drishti scanner components
//!
//! None of these return `Result`: every network failure is absorbed by the
//! implementation, so a single address can never abort a scan.

use async_trait::async_trait;
use std::time::Duration;

use crate::types::{EndpointRecord, Hostname};

/// Liveness check of one TCP port.
#[async_trait]
pub trait Prober: Send + Sync {
    /// True iff a connection to `address:port` is established within `timeout`.
    async fn check(&self, address: &str, port: u16, timeout: Duration) -> bool;

    fn name(&self) -> &str;
}

/// Best-effort reverse lookup.
#[async_trait]
pub trait HostnameResolver: Send + Sync {
    async fn resolve(&self, address: &str) -> Hostname;
}

/// Produces the full record for one address.
#[async_trait]
pub trait AddressScanner: Send + Sync {
    async fn scan_one(&self, address: &str) -> EndpointRecord;

    /// Scanner name/identifier
    fn name(&self) -> &str;
}
