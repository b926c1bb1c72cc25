//! Reverse DNS lookup

use async_trait::async_trait;
use drishti_common::{Hostname, HostnameResolver};
use std::net::IpAddr;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::system_conf::read_system_conf;
use trust_dns_resolver::TokioAsyncResolver;

/// PTR lookups through the system resolver configuration.
///
/// Each lookup gets a single attempt bounded by `timeout`; every failure is
/// reported as `Hostname::Unresolved`.
pub struct ReverseResolver {
    resolver: TokioAsyncResolver,
    timeout: Duration,
}

impl ReverseResolver {
    pub fn new(timeout: Duration) -> Self {
        let (config, mut opts) = match read_system_conf() {
            Ok(conf) => conf,
            Err(e) => {
                warn!("Falling back to default resolver config: {}", e);
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        opts.timeout = timeout;
        opts.attempts = 1;

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
            timeout,
        }
    }

    async fn lookup(&self, ip: IpAddr) -> Hostname {
        match timeout(self.timeout, self.resolver.reverse_lookup(ip)).await {
            Ok(Ok(answer)) => {
                let name = answer.iter().next().map(|ptr| ptr.to_string());
                Hostname::from_lookup(name.as_deref())
            }
            Ok(Err(e)) => {
                debug!("Reverse lookup failed: {}", e);
                Hostname::Unresolved
            }
            Err(_) => {
                debug!("Reverse lookup timed out");
                Hostname::Unresolved
            }
        }
    }
}

#[async_trait]
impl HostnameResolver for ReverseResolver {
    #[instrument(skip(self))]
    async fn resolve(&self, address: &str) -> Hostname {
        match address.parse::<IpAddr>() {
            Ok(ip) => self.lookup(ip).await,
            Err(_) => {
                debug!("Not an IP address, skipping reverse lookup");
                Hostname::Unresolved
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_address_is_unresolved() {
        let resolver = ReverseResolver::new(Duration::from_millis(200));
        let hostname = resolver.resolve("definitely not an ip").await;
        assert_eq!(hostname, Hostname::Unresolved);
        assert_ne!(hostname.as_str(), "");
    }

    #[tokio::test]
    async fn test_lookup_is_bounded_by_timeout() {
        let resolver = ReverseResolver::new(Duration::from_millis(200));
        let start = std::time::Instant::now();
        // TEST-NET-1, no PTR expected; either answer is fine, it must not hang.
        let _ = resolver.resolve("192.0.2.1").await;
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
