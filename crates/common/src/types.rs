//! Core data types for the Drishti endpoint scanner
//!
//! Records are built once per scanned address and never mutated afterwards,
//! so the model exposes constructors and read accessors rather than setters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Rendered in place of a hostname when reverse DNS did not succeed.
pub const UNRESOLVED_HOSTNAME: &str = "(unresolved)";

/// A named TCP port check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProtocolProbe {
    pub name: String,
    pub port: u16,
    /// Human-readable description, informational only.
    pub hint: String,
}

impl ProtocolProbe {
    #[inline]
    #[must_use]
    pub fn new<N: Into<String>, H: Into<String>>(name: N, port: u16, hint: H) -> Self {
        Self {
            name: name.into(),
            port,
            hint: hint.into(),
        }
    }
}

impl fmt::Display for ProtocolProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.port)
    }
}

/// Outcome of a single connect attempt.
///
/// Only `Open` counts as a detection; the other states exist for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortState {
    Open,
    Closed,
    Filtered,
    Unreachable,
}

impl PortState {
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, PortState::Open)
    }
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PortState::Open => "open",
            PortState::Closed => "closed",
            PortState::Filtered => "filtered",
            PortState::Unreachable => "unreachable",
        };
        f.write_str(s)
    }
}

/// Protocol names found open on one address. Iterates alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetectionSet(BTreeSet<String>);

impl DetectionSet {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, name: S) -> bool {
        self.0.insert(name.into())
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// True when at least one of `names` is present.
    #[must_use]
    pub fn intersects(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.0.contains(*name))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Names joined with `separator`, in alphabetical order.
    #[must_use]
    pub fn join(&self, separator: &str) -> String {
        self.iter().collect::<Vec<_>>().join(separator)
    }
}

impl<S: Into<String>> FromIterator<S> for DetectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Result of a reverse lookup.
///
/// Serializes as the name, or `null` when unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hostname {
    Resolved(String),
    Unresolved,
}

impl Hostname {
    /// Build from a lookup answer. Empty or dot-only names count as unresolved.
    #[must_use]
    pub fn from_lookup(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().trim_end_matches('.')) {
            Some(n) if !n.is_empty() => Hostname::Resolved(n.to_string()),
            _ => Hostname::Unresolved,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Hostname::Resolved(_))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Hostname::Resolved(name) => name,
            Hostname::Unresolved => UNRESOLVED_HOSTNAME,
        }
    }
}

impl fmt::Display for Hostname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device category inferred from a detection set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointCategory {
    Printer,
    WindowsServer,
    LinuxServer,
    NetworkAppliance,
    VideoCamera,
    WebServer,
    Unknown,
}

impl EndpointCategory {
    #[inline]
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            EndpointCategory::Printer => "Printer",
            EndpointCategory::WindowsServer => "Windows Server",
            EndpointCategory::LinuxServer => "Linux/Unix Server",
            EndpointCategory::NetworkAppliance => "Network Appliance",
            EndpointCategory::VideoCamera => "Video Camera",
            EndpointCategory::WebServer => "Web Server",
            EndpointCategory::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EndpointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything learned about one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    address: String,
    hostname: Hostname,
    protocols: DetectionSet,
    category: EndpointCategory,
}

impl EndpointRecord {
    #[must_use]
    pub fn new(
        address: String,
        hostname: Hostname,
        protocols: DetectionSet,
        category: EndpointCategory,
    ) -> Self {
        Self {
            address,
            hostname,
            protocols,
            category,
        }
    }

    #[inline]
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    #[inline]
    #[must_use]
    pub fn hostname(&self) -> &Hostname {
        &self.hostname
    }

    #[inline]
    #[must_use]
    pub fn protocols(&self) -> &DetectionSet {
        &self.protocols
    }

    #[inline]
    #[must_use]
    pub fn category(&self) -> EndpointCategory {
        self.category
    }
}

/// Scan behaviour tuning options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Per-probe connect timeout, also used for the reverse lookup.
    pub timeout: Duration,
    /// Upper bound on addresses scanned at the same time.
    pub max_workers: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(500),
            max_workers: 32,
        }
    }
}

impl ScanOptions {
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Worker count actually used for `address_count` addresses.
    #[inline]
    #[must_use]
    pub fn effective_workers(&self, address_count: usize) -> usize {
        self.max_workers.max(1).min(address_count)
    }
}

/// A batch of addresses submitted for scanning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanJob {
    pub id: Uuid,
    pub addresses: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ScanJob {
    #[inline]
    #[must_use]
    pub fn new(addresses: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            addresses,
            created_at: Utc::now(),
        }
    }

    #[inline]
    #[must_use]
    pub fn address_count(&self) -> usize {
        self.addresses.len()
    }
}
