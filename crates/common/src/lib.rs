//! Drishti Common - Shared types and traits
//!
//! This crate provides the data model, the protocol catalog, the error type
//! and the component traits used across the Drishti scanner crates.

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::ProtocolCatalog;
pub use error::{DrishtiError, DrishtiResult};
pub use traits::{AddressScanner, HostnameResolver, Prober};
pub use types::{
    DetectionSet, EndpointCategory, EndpointRecord, Hostname, PortState, ProtocolProbe, ScanJob,
    ScanOptions, UNRESOLVED_HOSTNAME,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
