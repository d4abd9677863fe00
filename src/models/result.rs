//! Result entity for the results view.

use serde::Serialize;

use crate::models::host::{ComplianceStatus, HostRef};
use crate::models::report::ResultElement;

/// NVT data carried by a result row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResultNvt {
    pub id: Option<String>,
    pub name: Option<String>,
    pub nvt_type: Option<String>,
    pub tags: Option<String>,
}

/// Quality of detection for a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Qod {
    pub value: Option<u64>,
    pub qod_type: Option<String>,
}

/// One finding row in the results table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub id: Option<String>,
    pub name: Option<String>,
    pub severity: Option<f64>,
    pub threat: Option<String>,
    pub host: HostRef,
    pub port: Option<String>,
    pub nvt: ResultNvt,
    pub qod: Qod,
    pub description: Option<String>,
    /// Audit reports only.
    pub compliance: Option<ComplianceStatus>,
    /// Delta reports only: `new` / `gone` / `same` / `changed`.
    pub delta: Option<String>,
}

impl ScanResult {
    pub fn from_element(element: &ResultElement) -> Self {
        let host = element
            .host
            .as_ref()
            .map(|host| HostRef {
                ip: host.ip.clone(),
                name: host.hostname.clone(),
                id: host
                    .asset
                    .as_ref()
                    .and_then(|asset| asset.asset_id.as_deref())
                    .filter(|id| !id.is_empty())
                    .map(String::from),
            })
            .unwrap_or_default();

        let nvt = element
            .nvt
            .as_ref()
            .map(|nvt| ResultNvt {
                id: nvt.oid.clone(),
                name: nvt.name.clone(),
                nvt_type: nvt.nvt_type.clone(),
                tags: nvt.tags.clone(),
            })
            .unwrap_or_default();

        let qod = element
            .qod
            .as_ref()
            .map(|qod| Qod {
                value: qod.value,
                qod_type: qod.qod_type.clone(),
            })
            .unwrap_or_default();

        Self {
            id: element.id.clone(),
            name: element.name.clone(),
            severity: element.severity,
            threat: element.threat.clone(),
            host,
            port: element.port.clone(),
            nvt,
            qod,
            description: element.description.clone(),
            compliance: element
                .compliance
                .as_deref()
                .map(|value| ComplianceStatus::from_text(Some(value))),
            delta: element.delta.clone(),
        }
    }
}
