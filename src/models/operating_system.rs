//! Operating-system entity for the OS view.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::host::ComplianceStatus;
use crate::parsers::severity;

/// One detected operating system, keyed by its `best_os_cpe` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportOperatingSystem {
    /// The `best_os_cpe` detail value, e.g. `"cpe:/o:linux:kernel"`.
    pub id: String,
    pub cpe: String,
    /// Human-readable `best_os_txt` value, when reported.
    pub name: Option<String>,
    /// Maximum severity among the hosts running this OS.
    pub severity: Option<f64>,
    /// IPs of the hosts running this OS.
    pub hosts: BTreeSet<String>,
    /// Audit reports: compliance verdict per host IP.
    pub compliance_by_host: BTreeMap<String, ComplianceStatus>,
}

impl ReportOperatingSystem {
    pub fn new(cpe: &str, name: Option<&str>) -> Self {
        Self {
            id: cpe.to_string(),
            cpe: cpe.to_string(),
            name: name.map(String::from),
            severity: None,
            hosts: BTreeSet::new(),
            compliance_by_host: BTreeMap::new(),
        }
    }

    /// Attach a host running this OS; re-adds are no-ops.
    pub fn add_host(&mut self, ip: &str) {
        if !ip.is_empty() {
            self.hosts.insert(ip.to_string());
        }
    }

    /// Raise the severity to `candidate` if it is higher; never lowers it.
    pub fn set_severity_if_larger(&mut self, candidate: Option<f64>) {
        self.severity = severity::max_severity(self.severity, candidate);
    }

    pub fn set_host_compliance(&mut self, ip: &str, status: ComplianceStatus) {
        self.compliance_by_host.insert(ip.to_string(), status);
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }
}
