//! CVE entity for the CVEs view.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::report::{NvtElement, ResultElement};
use crate::models::xml;
use crate::parsers::severity;

/// Results grouped by the NVT that referenced one or more CVEs.
///
/// The view groups by NVT OID, not by CVE id: one entity carries every CVE
/// its NVT references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportCve {
    /// OID of the grouping NVT.
    pub id: String,
    pub nvt_name: Option<String>,
    /// All CVE ids referenced by the NVT.
    pub cves: Vec<String>,
    /// Maximum severity across the grouped results.
    pub severity: Option<f64>,
    /// IPs of the hosts the grouped results were found on.
    pub hosts: BTreeSet<String>,
    /// Number of results grouped under this NVT.
    pub occurrences: u64,
}

impl ReportCve {
    pub fn from_nvt(oid: &str, nvt: &NvtElement) -> Self {
        Self {
            id: oid.to_string(),
            nvt_name: nvt.name.clone(),
            cves: referenced_cves(nvt),
            severity: None,
            hosts: BTreeSet::new(),
            occurrences: 0,
        }
    }

    /// Fold one grouped result into the entity.
    pub fn add_result(&mut self, result: &ResultElement) {
        self.severity = severity::max_severity(self.severity, result.severity);
        if let Some(ip) = result.host.as_ref().and_then(|h| h.ip.as_deref()) {
            if !ip.is_empty() {
                self.hosts.insert(ip.to_string());
            }
        }
        self.occurrences += 1;
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }
}

/// CVE ids among an NVT's references.
pub fn referenced_cves(nvt: &NvtElement) -> Vec<String> {
    xml::elements(nvt.refs.as_ref().and_then(|refs| refs.entries.as_ref()))
        .iter()
        .filter(|entry| entry.ref_type.as_deref() == Some("cve"))
        .filter_map(|entry| entry.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nvt(value: serde_json::Value) -> NvtElement {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn collects_only_cve_typed_refs() {
        let nvt = nvt(json!({
            "_oid": "1.3.6.1.4.1",
            "name": "Test NVT",
            "refs": {"ref": [
                {"_id": "CVE-2024-0001", "_type": "cve"},
                {"_id": "some-url", "_type": "url"},
                {"_id": "CVE-2024-0002", "_type": "cve"},
            ]},
        }));
        assert_eq!(referenced_cves(&nvt), vec!["CVE-2024-0001", "CVE-2024-0002"]);
    }

    #[test]
    fn add_result_accumulates() {
        let nvt = nvt(json!({
            "_oid": "1.3.6.1.4.1",
            "refs": {"ref": {"_id": "CVE-2024-0001", "_type": "cve"}},
        }));
        let mut cve = ReportCve::from_nvt("1.3.6.1.4.1", &nvt);
        let first: ResultElement = serde_json::from_value(json!({
            "host": {"__text": "10.0.0.1"},
            "severity": 4.0,
        }))
        .unwrap();
        let second: ResultElement = serde_json::from_value(json!({
            "host": {"__text": "10.0.0.2"},
            "severity": 9.8,
        }))
        .unwrap();
        cve.add_result(&first);
        cve.add_result(&second);
        assert_eq!(cve.occurrences, 2);
        assert_eq!(cve.severity, Some(9.8));
        assert_eq!(cve.host_count(), 2);
    }
}
