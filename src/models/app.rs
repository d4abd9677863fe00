//! Installed-application (CPE) entity for the apps view.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::parsers::severity;

/// Occurrence tally for one application, split by how it was detected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppOccurrences {
    /// Occurrences confirmed by an explicit detection detail on a result.
    pub details: u64,
    /// Occurrences inferred only from a host-level product tag.
    pub without_details: u64,
    pub total: u64,
}

/// One detected application, keyed by its CPE.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportApp {
    /// CPE identifying the application, e.g. `"cpe:/a:openbsd:openssh:9.6"`.
    pub id: String,
    pub name: String,
    /// Maximum severity among results whose detection matched this CPE.
    pub severity: Option<f64>,
    /// IPs of the hosts the application was detected on.
    pub hosts: BTreeSet<String>,
    pub occurrences: AppOccurrences,
}

impl ReportApp {
    pub fn new(cpe: &str, severity: Option<f64>) -> Self {
        Self {
            id: cpe.to_string(),
            name: cpe.to_string(),
            severity,
            hosts: BTreeSet::new(),
            occurrences: AppOccurrences::default(),
        }
    }

    /// Attach a host the application was detected on; re-adds are no-ops.
    pub fn add_host(&mut self, ip: &str) {
        if !ip.is_empty() {
            self.hosts.insert(ip.to_string());
        }
    }

    /// Raise the severity to `candidate` if it is higher; never lowers it.
    pub fn set_severity_if_larger(&mut self, candidate: Option<f64>) {
        self.severity = severity::max_severity(self.severity, candidate);
    }

    /// Count occurrences: `Some(n)` adds detection-detail-backed occurrences,
    /// `None` a single host-tag-only one.
    pub fn add_occurrence(&mut self, details_count: Option<u64>) {
        match details_count {
            Some(count) => {
                self.occurrences.details += count;
                self.occurrences.total += count;
            }
            None => {
                self.occurrences.without_details += 1;
                self.occurrences.total += 1;
            }
        }
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occurrence_split() {
        let mut app = ReportApp::new("cpe:/a:vendor:tool", None);
        app.add_occurrence(Some(3));
        app.add_occurrence(None);
        assert_eq!(app.occurrences.details, 3);
        assert_eq!(app.occurrences.without_details, 1);
        assert_eq!(app.occurrences.total, 4);
    }

    #[test]
    fn hosts_deduplicate_by_ip() {
        let mut app = ReportApp::new("cpe:/a:vendor:tool", Some(5.0));
        app.add_host("10.0.0.1");
        app.add_host("10.0.0.1");
        assert_eq!(app.host_count(), 1);
    }
}
