//! Closed-CVE entity for the closed-CVEs view.

use serde::Serialize;

use crate::models::host::HostRef;
use crate::models::report::SourceElement;

/// One CVE reported closed on one host by one detection source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedCve {
    /// `"<cveId>-<hostIp>-<sourceName>"`.
    pub id: String,
    pub cve_id: String,
    pub host: HostRef,
    pub source: Option<SourceElement>,
    pub severity: Option<f64>,
}

impl ClosedCve {
    /// Merge a colliding entry for the same key.
    ///
    /// A collision can only come from the same source listing a CVE twice
    /// for one host; the lower of the competing severities is kept.
    pub fn merge_severity(&mut self, incoming: Option<f64>) {
        match (self.severity, incoming) {
            (Some(current), Some(candidate)) if current > candidate => {
                self.severity = Some(candidate);
            }
            (None, candidate) => self.severity = candidate,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cve(severity: Option<f64>) -> ClosedCve {
        ClosedCve {
            id: "CVE-2000-1234-10.0.0.1-openvas".to_string(),
            cve_id: "CVE-2000-1234".to_string(),
            host: HostRef::default(),
            source: None,
            severity,
        }
    }

    #[test]
    fn merge_keeps_lower_severity() {
        let mut existing = cve(Some(9.0));
        existing.merge_severity(Some(3.0));
        assert_eq!(existing.severity, Some(3.0));
    }

    #[test]
    fn merge_does_not_raise_severity() {
        let mut existing = cve(Some(3.0));
        existing.merge_severity(Some(9.0));
        assert_eq!(existing.severity, Some(3.0));
    }

    #[test]
    fn merge_fills_missing_severity() {
        let mut existing = cve(None);
        existing.merge_severity(Some(5.0));
        assert_eq!(existing.severity, Some(5.0));
    }
}
