//! Port entity for the ports view.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::report::PortElement;
use crate::parsers::severity;

static PORT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)/(\S+)$").expect("port id pattern"));

/// One exposed port, accumulated across all hosts exposing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPort {
    /// Natural key, e.g. `"443/tcp"`.
    pub id: String,
    pub number: Option<u32>,
    pub protocol: Option<String>,
    /// Threat label from the first element seen for this port.
    pub threat: Option<String>,
    /// Maximum severity across all elements seen for this port.
    pub severity: Option<f64>,
    /// IPs of the hosts exposing this port.
    pub hosts: BTreeSet<String>,
}

impl ReportPort {
    pub fn from_element(id: &str, element: &PortElement) -> Self {
        let (number, protocol) = match PORT_ID.captures(id) {
            Some(caps) => (caps[1].parse().ok(), Some(caps[2].to_string())),
            None => (None, None),
        };
        Self {
            id: id.to_string(),
            number,
            protocol,
            threat: element.threat.clone(),
            severity: element.severity,
            hosts: BTreeSet::new(),
        }
    }

    /// Register a host exposing this port; re-adding an IP is a no-op.
    pub fn add_host(&mut self, ip: &str) {
        if !ip.is_empty() {
            self.hosts.insert(ip.to_string());
        }
    }

    /// Raise the severity to `candidate` if it is higher; never lowers it.
    pub fn set_severity_if_larger(&mut self, candidate: Option<f64>) {
        self.severity = severity::max_severity(self.severity, candidate);
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }
}
