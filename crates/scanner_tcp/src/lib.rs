//! TCP scanner - port liveness probes and per-address dispatch

mod endpoint;
mod scanner;

pub use endpoint::EndpointScanner;
pub use scanner::{probe_port, TcpProber};
