//! Protocol catalog
//!
//! The ordered list of probes run against every address. Order is kept
//! stable so that logs list probes the same way on every run.

use std::collections::HashSet;

use crate::error::{DrishtiError, DrishtiResult};
use crate::types::ProtocolProbe;

pub const SSH: &str = "SSH";
pub const RDP: &str = "RDP";
pub const SMB: &str = "SMB";
pub const HTTP: &str = "HTTP";
pub const HTTPS: &str = "HTTPS";
pub const FTP: &str = "FTP";
pub const SMTP: &str = "SMTP";
pub const IMAP: &str = "IMAP";
pub const POP3: &str = "POP3";
pub const TELNET: &str = "TELNET";
pub const SNMP: &str = "SNMP";
pub const IPP: &str = "IPP";
pub const LPD: &str = "LPD";
pub const RAW_PRINTING: &str = "RAW_PRINTING";
pub const RTSP: &str = "RTSP";
pub const ONVIF: &str = "ONVIF";
pub const SIP: &str = "SIP";

const DEFAULT_PROBES: &[(&str, u16, &str)] = &[
    (SSH, 22, "Remote shell / Linux"),
    (RDP, 3389, "Remote Desktop / Windows"),
    (SMB, 445, "File sharing / Windows"),
    (HTTP, 80, "Web server"),
    (HTTPS, 443, "Secure web server"),
    (FTP, 21, "File transfer"),
    (SMTP, 25, "Mail server"),
    (IMAP, 143, "Mail access"),
    (POP3, 110, "Mail access"),
    (TELNET, 23, "Legacy remote shell"),
    (SNMP, 161, "Network management"),
    (IPP, 631, "Printing"),
    (LPD, 515, "Printing"),
    (RAW_PRINTING, 9100, "Direct printing"),
    (RTSP, 554, "Streaming video"),
    (ONVIF, 8000, "Camera / DVR"),
    (SIP, 5060, "Voice over IP"),
];

/// Ordered, immutable set of probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolCatalog {
    probes: Vec<ProtocolProbe>,
}

impl ProtocolCatalog {
    /// Build a custom catalog. Names must be unique and ports non-zero.
    pub fn new(probes: Vec<ProtocolProbe>) -> DrishtiResult<Self> {
        let mut seen = HashSet::with_capacity(probes.len());
        for probe in &probes {
            if probe.port == 0 {
                return Err(DrishtiError::InvalidPort {
                    name: probe.name.clone(),
                    port: probe.port,
                });
            }
            if !seen.insert(probe.name.as_str()) {
                return Err(DrishtiError::DuplicateProtocol(probe.name.clone()));
            }
        }
        Ok(Self { probes })
    }

    #[inline]
    #[must_use]
    pub fn probes(&self) -> &[ProtocolProbe] {
        &self.probes
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProtocolProbe> {
        self.probes.iter().find(|p| p.name == name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

impl Default for ProtocolCatalog {
    fn default() -> Self {
        Self {
            probes: DEFAULT_PROBES
                .iter()
                .map(|&(name, port, hint)| ProtocolProbe::new(name, port, hint))
                .collect(),
        }
    }
}
