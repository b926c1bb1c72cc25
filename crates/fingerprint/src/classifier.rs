//! Ordered rule chain for device classification
//!
//! Rules are evaluated top to bottom and the first match wins. The order is
//! part of the contract: a host offering RDP and SSH is a Windows server
//! because the Windows rule comes first, not because it is more specific.

use drishti_common::catalog::{HTTP, HTTPS, IPP, LPD, ONVIF, RAW_PRINTING, RDP, RTSP, SMB, SNMP, SSH};
use drishti_common::{DetectionSet, EndpointCategory};
use tracing::trace;

/// One `(predicate, category)` pair of the chain.
pub struct ClassificationRule {
    pub category: EndpointCategory,
    pub predicate: fn(&DetectionSet) -> bool,
}

fn is_printer(protocols: &DetectionSet) -> bool {
    protocols.intersects(&[IPP, LPD, RAW_PRINTING])
}

fn is_windows(protocols: &DetectionSet) -> bool {
    protocols.intersects(&[SMB, RDP])
}

fn is_camera(protocols: &DetectionSet) -> bool {
    protocols.intersects(&[RTSP, ONVIF])
}

// RDP exclusion must stay even though the Windows rule already claims RDP hosts.
fn is_linux(protocols: &DetectionSet) -> bool {
    protocols.contains(SSH) && !protocols.contains(RDP)
}

fn is_network_appliance(protocols: &DetectionSet) -> bool {
    protocols.contains(SNMP)
}

fn is_web(protocols: &DetectionSet) -> bool {
    protocols.intersects(&[HTTP, HTTPS])
}

pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule { category: EndpointCategory::Printer, predicate: is_printer },
    ClassificationRule { category: EndpointCategory::WindowsServer, predicate: is_windows },
    ClassificationRule { category: EndpointCategory::VideoCamera, predicate: is_camera },
    ClassificationRule { category: EndpointCategory::LinuxServer, predicate: is_linux },
    ClassificationRule { category: EndpointCategory::NetworkAppliance, predicate: is_network_appliance },
    ClassificationRule { category: EndpointCategory::WebServer, predicate: is_web },
];

/// Category of the first matching rule, `Unknown` when none match.
pub fn classify(protocols: &DetectionSet) -> EndpointCategory {
    let category = CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.predicate)(protocols))
        .map_or(EndpointCategory::Unknown, |rule| rule.category);
    trace!(protocols = %protocols.join(","), %category, "classified");
    category
}

#[cfg(test)]
mod tests {
    use super::*;
    use drishti_common::catalog::{FTP, SIP, SMTP, TELNET};

    fn set(names: &[&str]) -> DetectionSet {
        names.iter().copied().collect()
    }

    #[test]
    fn empty_set_is_unknown() {
        assert_eq!(classify(&DetectionSet::new()), EndpointCategory::Unknown);
    }

    #[test]
    fn unmatched_protocols_are_unknown() {
        assert_eq!(classify(&set(&[FTP, SMTP, TELNET, SIP])), EndpointCategory::Unknown);
    }

    #[test]
    fn rdp_beats_ssh() {
        assert_eq!(classify(&set(&[RDP, SSH])), EndpointCategory::WindowsServer);
    }

    #[test]
    fn ssh_alone_is_linux() {
        assert_eq!(classify(&set(&[SSH])), EndpointCategory::LinuxServer);
    }

    #[test]
    fn printer_beats_web() {
        assert_eq!(classify(&set(&[IPP])), EndpointCategory::Printer);
        assert_eq!(classify(&set(&[IPP, HTTP])), EndpointCategory::Printer);
        assert_eq!(classify(&set(&[RAW_PRINTING, SMB])), EndpointCategory::Printer);
    }

    #[test]
    fn snmp_beats_web() {
        assert_eq!(classify(&set(&[SNMP])), EndpointCategory::NetworkAppliance);
        assert_eq!(classify(&set(&[HTTP, SNMP])), EndpointCategory::NetworkAppliance);
    }

    #[test]
    fn camera_beats_web() {
        assert_eq!(classify(&set(&[RTSP])), EndpointCategory::VideoCamera);
        assert_eq!(classify(&set(&[ONVIF, HTTP])), EndpointCategory::VideoCamera);
    }

    #[test]
    fn camera_beats_linux() {
        assert_eq!(classify(&set(&[RTSP, SSH])), EndpointCategory::VideoCamera);
    }

    #[test]
    fn web_only() {
        assert_eq!(classify(&set(&[HTTPS])), EndpointCategory::WebServer);
    }

    #[test]
    fn linux_rule_excludes_rdp_on_its_own() {
        assert!(is_linux(&set(&[SSH])));
        assert!(!is_linux(&set(&[SSH, RDP])));
    }

    #[test]
    fn classification_is_deterministic() {
        let protocols = set(&[SSH, HTTP, SNMP]);
        assert_eq!(classify(&protocols), classify(&protocols));
        assert_eq!(classify(&protocols), EndpointCategory::LinuxServer);
    }

    #[test]
    fn rule_order_is_fixed() {
        let order: Vec<_> = CLASSIFICATION_RULES.iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![
                EndpointCategory::Printer,
                EndpointCategory::WindowsServer,
                EndpointCategory::VideoCamera,
                EndpointCategory::LinuxServer,
                EndpointCategory::NetworkAppliance,
                EndpointCategory::WebServer,
            ]
        );
    }
}
