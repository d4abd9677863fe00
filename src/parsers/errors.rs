//! Errors view: scanner error messages keyed by host and NVT.

use std::collections::BTreeMap;

use crate::models::collection::{CollectionCounts, CollectionList};
use crate::models::filter::Filter;
use crate::models::host::HostRef;
use crate::models::report::Report;
use crate::models::scan_error::{NvtRef, ScanError};
use crate::models::xml;

/// Build the scan-errors collection.
///
/// Error elements without both a host and an NVT are unusable (no key to
/// form) and are dropped. Host names are resolved from a side-table built
/// out of `hostname` host details.
pub fn parse_errors(report: &Report, filter: &Filter) -> CollectionList<ScanError> {
    let Some(errors) = report.errors.as_ref() else {
        return CollectionList::empty(filter);
    };

    let hostnames = hostnames_by_ip(report);
    let mut entities = Vec::new();
    for element in xml::elements(errors.error.as_ref()) {
        let (Some(host), Some(nvt)) = (element.host.as_ref(), element.nvt.as_ref()) else {
            continue;
        };
        let ip = host.ip.clone().unwrap_or_default();
        let oid = nvt.oid.clone().unwrap_or_default();
        let asset_id = host
            .asset
            .as_ref()
            .and_then(|asset| asset.asset_id.as_deref())
            .filter(|id| !id.is_empty())
            .map(String::from);
        entities.push(ScanError {
            id: format!("{ip}:{oid}"),
            description: element.description.clone(),
            host: HostRef {
                name: hostnames.get(&ip).cloned(),
                ip: Some(ip),
                id: asset_id,
            },
            nvt: NvtRef {
                id: oid,
                name: nvt.name.clone(),
            },
            port: element.port.clone(),
            severity: element.severity,
        });
    }

    let counts = CollectionCounts::for_entities(entities.len(), errors.count);
    CollectionList::new(entities, counts, filter)
}

/// Hostname per IP, from `hostname` host details.
fn hostnames_by_ip(report: &Report) -> BTreeMap<String, String> {
    let mut hostnames = BTreeMap::new();
    for host in xml::elements(report.host.as_ref()) {
        let Some(ip) = host.ip.as_deref() else {
            continue;
        };
        for detail in xml::elements(host.detail.as_ref()) {
            if detail.name.as_deref() == Some("hostname") {
                if let Some(value) = detail.value.as_deref() {
                    hostnames.insert(ip.to_string(), value.to_string());
                }
            }
        }
    }
    hostnames
}
