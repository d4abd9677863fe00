//! TLS certificate entity for the certificates view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::report::TlsCertificateElement;
use crate::models::xml::{self, parse_timestamp};

/// One TLS certificate observation.
///
/// The certificates view shows one row per certificate/port combination, so
/// a parsed certificate is exploded via [`ReportTlsCertificate::copy_for_port`]
/// before it reaches the collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTlsCertificate {
    pub serial: Option<String>,
    pub sha256_fingerprint: Option<String>,
    pub md5_fingerprint: Option<String>,
    pub subject_dn: Option<String>,
    pub issuer_dn: Option<String>,
    pub activation_time: Option<DateTime<Utc>>,
    pub expiration_time: Option<DateTime<Utc>>,
    pub valid: Option<bool>,
    pub hostname: Option<String>,
    pub ip: Option<String>,
    /// DER data, base64 encoded as delivered.
    pub data: Option<String>,
    /// The single port of an exploded per-port entry.
    pub port: Option<u64>,
    pub ports: Vec<u64>,
}

impl ReportTlsCertificate {
    pub fn from_element(element: &TlsCertificateElement) -> Self {
        let ports = xml::elements(element.ports.as_ref().and_then(|p| p.port.as_ref()))
            .iter()
            .filter_map(|port| port.as_u64())
            .collect();
        Self {
            serial: element.serial.clone(),
            sha256_fingerprint: element.sha256_fingerprint.clone(),
            md5_fingerprint: element.md5_fingerprint.clone(),
            subject_dn: element.subject_dn.clone(),
            issuer_dn: element.issuer_dn.clone(),
            activation_time: parse_timestamp(element.activation_time.as_deref()),
            expiration_time: parse_timestamp(element.expiration_time.as_deref()),
            valid: element.valid,
            hostname: element.hostname.clone(),
            ip: element.ip.clone(),
            data: element.data.clone(),
            port: None,
            ports,
        }
    }

    /// Copy of this certificate differing only in its port fields.
    pub fn copy_for_port(&self, port: u64) -> Self {
        let mut copy = self.clone();
        copy.port = Some(port);
        copy.ports = vec![port];
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn collects_ports_from_element() {
        let element: TlsCertificateElement = serde_json::from_value(json!({
            "serial": "01ABC",
            "subject_dn": "CN=example.com",
            "activation_time": "2024-01-01T00:00:00Z",
            "expiration_time": "2026-01-01T00:00:00Z",
            "valid": "1",
            "ports": {"port": ["4021", 4023]},
        }))
        .unwrap();
        let cert = ReportTlsCertificate::from_element(&element);
        assert_eq!(cert.ports, vec![4021, 4023]);
        assert_eq!(cert.port, None);
        assert_eq!(cert.valid, Some(true));
        assert!(cert.activation_time.is_some());
    }

    #[test]
    fn copy_for_port_differs_only_in_ports() {
        let element: TlsCertificateElement =
            serde_json::from_value(json!({"serial": "01ABC", "ports": {"port": [443, 8443]}}))
                .unwrap();
        let cert = ReportTlsCertificate::from_element(&element);
        let exploded = cert.copy_for_port(443);
        assert_eq!(exploded.port, Some(443));
        assert_eq!(exploded.ports, vec![443]);
        assert_eq!(exploded.serial, cert.serial);
    }
}
