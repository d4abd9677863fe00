//! Host entity for the hosts view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::report::HostElement;
use crate::models::xml::{self, parse_timestamp};

/// Compliance verdict carried by hosts, results and operating systems in
/// audit reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    Yes,
    No,
    Incomplete,
    Undefined,
}

impl ComplianceStatus {
    pub fn from_text(value: Option<&str>) -> Self {
        match value {
            Some("yes") => Self::Yes,
            Some("no") => Self::No,
            Some("incomplete") => Self::Incomplete,
            _ => Self::Undefined,
        }
    }
}

/// Per-threat result counts for one host, from the host element's count nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostResultCounts {
    pub high: u64,
    pub warning: u64,
    pub low: u64,
    pub log: u64,
    pub false_positive: u64,
    pub total: u64,
}

/// Host reference embedded in error and closed-CVE entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostRef {
    pub ip: Option<String>,
    pub name: Option<String>,
    /// Asset id, when the host is tracked as an asset.
    pub id: Option<String>,
}

/// One scanned host with its severity roll-up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportHost {
    pub ip: Option<String>,
    /// Asset id, when the host is tracked as an asset.
    pub id: Option<String>,
    pub hostname: Option<String>,
    pub best_os_cpe: Option<String>,
    pub best_os_txt: Option<String>,
    /// Maximum severity of the results referencing this host's IP.
    pub severity: Option<f64>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub port_count: u64,
    pub result_counts: HostResultCounts,
    pub compliance: ComplianceStatus,
}

impl ReportHost {
    /// Build a host entity from its raw element and resolved severity.
    pub fn from_element(element: &HostElement, severity: Option<f64>) -> Self {
        let mut hostname = None;
        let mut best_os_cpe = None;
        let mut best_os_txt = None;
        for detail in xml::elements(element.detail.as_ref()) {
            match detail.name.as_deref() {
                Some("hostname") => hostname = detail.value.clone(),
                Some("best_os_cpe") => best_os_cpe = detail.value.clone(),
                Some("best_os_txt") => best_os_txt = detail.value.clone(),
                _ => {}
            }
        }

        let counts = element.result_count.as_ref();
        let page = |node: Option<&crate::models::report::PageCountElement>| {
            node.and_then(|n| n.page).unwrap_or(0)
        };
        let result_counts = HostResultCounts {
            high: page(counts.and_then(|c| c.hole.as_ref())),
            warning: page(counts.and_then(|c| c.warning.as_ref())),
            low: page(counts.and_then(|c| c.info.as_ref())),
            log: page(counts.and_then(|c| c.log.as_ref())),
            false_positive: page(counts.and_then(|c| c.false_positive.as_ref())),
            total: counts.and_then(|c| c.page).unwrap_or(0),
        };

        Self {
            ip: element.ip.clone(),
            id: asset_id(element),
            hostname,
            best_os_cpe,
            best_os_txt,
            severity,
            start: parse_timestamp(element.start.as_deref()),
            end: parse_timestamp(element.end.as_deref()),
            port_count: page(element.port_count.as_ref()),
            result_counts,
            compliance: ComplianceStatus::from_text(element.host_compliance.as_deref()),
        }
    }
}

fn asset_id(element: &HostElement) -> Option<String> {
    element
        .asset
        .as_ref()
        .and_then(|asset| asset.asset_id.as_deref())
        .filter(|id| !id.is_empty())
        .map(String::from)
}
