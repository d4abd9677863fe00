//! Typed model of the raw scan report document.
//!
//! The shape follows the XML-to-JSON conversion the management protocol
//! produces: attributes as `_`-prefixed keys, text content under `__text`,
//! repeatable elements as object-or-array. Sub-trees the client did not
//! request are absent entirely; the parsers treat absence as "not requested",
//! which is distinct from "requested but empty".

use serde::{Deserialize, Serialize};

use crate::errors::ReportError;
use crate::models::xml::{self, OneOrMany};

/// The whole report payload, with every sub-tree optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Report {
    pub task: Option<TaskElement>,
    pub host: Option<OneOrMany<HostElement>>,
    /// Host summary node; `hosts.count` is the server-side total.
    pub hosts: Option<CountElement>,
    pub results: Option<ResultsElement>,
    pub result_count: Option<ResultCountElement>,
    pub compliance_count: Option<ResultCountElement>,
    pub ports: Option<PortsElement>,
    pub apps: Option<CountElement>,
    pub os: Option<CountElement>,
    pub ssl_certs: Option<CountElement>,
    pub tls_certificates: Option<TlsCertificatesElement>,
    pub errors: Option<ErrorsElement>,
    pub closed_cves: Option<CountElement>,
}

impl Report {
    /// Decode a report document from raw JSON bytes.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, ReportError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Decode a report document from an already-parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ReportError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Summary node carrying only a server-side total.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CountElement {
    #[serde(deserialize_with = "xml::de::opt_u64")]
    pub count: Option<u64>,
}

/// Task the report belongs to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TaskElement {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub target: Option<TargetElement>,
    #[serde(deserialize_with = "xml::de::opt_u64")]
    pub progress: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetElement {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
}

// -- Hosts --

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HostElement {
    pub ip: Option<String>,
    pub asset: Option<AssetElement>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub port_count: Option<PageCountElement>,
    pub result_count: Option<HostResultCountElement>,
    pub detail: Option<OneOrMany<DetailElement>>,
    /// Audit reports only: `yes` / `no` / `incomplete` / `undefined`.
    #[serde(deserialize_with = "xml::de::opt_text")]
    pub host_compliance: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetElement {
    #[serde(rename = "_asset_id")]
    pub asset_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PageCountElement {
    #[serde(deserialize_with = "xml::de::opt_u64")]
    pub page: Option<u64>,
}

/// Per-threat result counts attached to a host element.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HostResultCountElement {
    #[serde(deserialize_with = "xml::de::opt_u64")]
    pub page: Option<u64>,
    pub hole: Option<PageCountElement>,
    pub warning: Option<PageCountElement>,
    pub info: Option<PageCountElement>,
    pub log: Option<PageCountElement>,
    pub false_positive: Option<PageCountElement>,
}

/// Name/value side-channel attached to hosts and result detections.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetailElement {
    pub name: Option<String>,
    #[serde(deserialize_with = "xml::de::opt_text")]
    pub value: Option<String>,
    #[serde(deserialize_with = "xml::de::opt_text")]
    pub extra: Option<String>,
    pub source: Option<SourceElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceElement {
    #[serde(rename = "type")]
    pub source_type: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

// -- Results --

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResultsElement {
    #[serde(rename = "_start", deserialize_with = "xml::de::opt_u64")]
    pub start: Option<u64>,
    #[serde(rename = "_max", deserialize_with = "xml::de::opt_u64")]
    pub max: Option<u64>,
    pub result: Option<OneOrMany<ResultElement>>,
}

/// Paged result totals: `full` is the unfiltered total, which delta reports
/// do not carry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResultCountElement {
    #[serde(deserialize_with = "xml::de::opt_u64")]
    pub full: Option<u64>,
    #[serde(deserialize_with = "xml::de::opt_u64")]
    pub filtered: Option<u64>,
    #[serde(rename = "__text", deserialize_with = "xml::de::opt_u64")]
    pub total: Option<u64>,
}

/// One finding: an NVT execution against a host.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResultElement {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub host: Option<ResultHostElement>,
    #[serde(deserialize_with = "xml::de::opt_text")]
    pub port: Option<String>,
    pub nvt: Option<NvtElement>,
    #[serde(deserialize_with = "xml::de::opt_f64")]
    pub severity: Option<f64>,
    pub threat: Option<String>,
    pub qod: Option<QodElement>,
    pub description: Option<String>,
    #[serde(deserialize_with = "xml::de::opt_text")]
    pub compliance: Option<String>,
    /// Delta reports only: `new` / `gone` / `same` / `changed`.
    #[serde(deserialize_with = "xml::de::opt_text")]
    pub delta: Option<String>,
    pub detection: Option<DetectionElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResultHostElement {
    #[serde(rename = "__text")]
    pub ip: Option<String>,
    pub asset: Option<AssetElement>,
    pub hostname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NvtElement {
    #[serde(rename = "_oid")]
    pub oid: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub nvt_type: Option<String>,
    pub tags: Option<String>,
    pub refs: Option<RefsElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RefsElement {
    #[serde(rename = "ref")]
    pub entries: Option<OneOrMany<RefElement>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RefElement {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(rename = "_type")]
    pub ref_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QodElement {
    #[serde(deserialize_with = "xml::de::opt_u64")]
    pub value: Option<u64>,
    #[serde(rename = "type")]
    pub qod_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectionElement {
    pub result: Option<DetectionResultElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectionResultElement {
    pub details: Option<DetectionDetailsElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DetectionDetailsElement {
    pub detail: Option<OneOrMany<DetailElement>>,
}

// -- Ports --

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PortsElement {
    #[serde(deserialize_with = "xml::de::opt_u64")]
    pub count: Option<u64>,
    pub port: Option<OneOrMany<PortElement>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PortElement {
    /// Port identifier text, e.g. `"443/tcp"` or the synthetic `"general/tcp"`.
    #[serde(rename = "__text")]
    pub id: Option<String>,
    #[serde(deserialize_with = "xml::de::opt_text")]
    pub host: Option<String>,
    #[serde(deserialize_with = "xml::de::opt_f64")]
    pub severity: Option<f64>,
    pub threat: Option<String>,
}

// -- TLS certificates --

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsCertificatesElement {
    pub tls_certificate: Option<OneOrMany<TlsCertificateElement>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsCertificateElement {
    pub name: Option<String>,
    pub data: Option<String>,
    #[serde(deserialize_with = "xml::de::opt_text")]
    pub serial: Option<String>,
    pub sha256_fingerprint: Option<String>,
    pub md5_fingerprint: Option<String>,
    pub activation_time: Option<String>,
    pub expiration_time: Option<String>,
    #[serde(deserialize_with = "xml::de::opt_bool")]
    pub valid: Option<bool>,
    pub subject_dn: Option<String>,
    pub issuer_dn: Option<String>,
    pub hostname: Option<String>,
    pub ip: Option<String>,
    pub ports: Option<PortListElement>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PortListElement {
    pub port: Option<OneOrMany<PortNumber>>,
}

/// Port number leaf, arriving as a JSON number or string.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PortNumber {
    Number(u64),
    Text(String),
}

impl PortNumber {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

// -- Scan errors --

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ErrorsElement {
    #[serde(deserialize_with = "xml::de::opt_u64")]
    pub count: Option<u64>,
    pub error: Option<OneOrMany<ErrorElement>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ErrorElement {
    pub host: Option<ResultHostElement>,
    pub nvt: Option<NvtElement>,
    pub description: Option<String>,
    #[serde(deserialize_with = "xml::de::opt_text")]
    pub port: Option<String>,
    #[serde(deserialize_with = "xml::de::opt_f64")]
    pub severity: Option<f64>,
}
