//! Scan-error entity for the errors view.

use serde::Serialize;

use crate::models::host::HostRef;

/// NVT reference embedded in error entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NvtRef {
    /// NVT OID.
    pub id: String,
    pub name: Option<String>,
}

/// One scanner error message, keyed by host and NVT.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanError {
    /// `"<hostIp>:<nvtOid>"`.
    pub id: String,
    pub description: Option<String>,
    pub host: HostRef,
    pub nvt: NvtRef,
    pub port: Option<String>,
    pub severity: Option<f64>,
}
