// crates/scanner_tcp/src/scanner.rs
//! TCP connect prober
//!
//! Liveness only: the stream is dropped as soon as the handshake completes,
//! nothing is read or written.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, instrument};

use drishti_common::{PortState, Prober};

/// Connect to `address:port` once and report what happened.
///
/// `address` may be any string `TcpStream::connect` accepts; anything else
/// ends up as `Unreachable`.
#[instrument(level = "trace")]
pub async fn probe_port(address: &str, port: u16, connect_timeout: Duration) -> PortState {
    let start = Instant::now();
    let state = match timeout(connect_timeout, TcpStream::connect((address, port))).await {
        Ok(Ok(stream)) => {
            drop(stream);
            PortState::Open
        }
        Ok(Err(e)) => match e.kind() {
            ErrorKind::ConnectionRefused => PortState::Closed,
            ErrorKind::TimedOut => PortState::Filtered,
            _ => {
                debug!("Connect to {}:{} failed: {}", address, port, e);
                PortState::Unreachable
            }
        },
        Err(_) => PortState::Filtered,
    };
    debug!(
        "{}:{} {} in {}ms",
        address,
        port,
        state,
        start.elapsed().as_millis()
    );
    state
}

/// Simple TCP connect prober.
pub struct TcpProber;

impl TcpProber {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TcpProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Prober for TcpProber {
    async fn check(&self, address: &str, port: u16, timeout: Duration) -> bool {
        probe_port(address, port, timeout).await.is_open()
    }

    fn name(&self) -> &str {
        "TCP Connect Prober"
    }
}
