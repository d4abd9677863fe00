//! CVEs view: results grouped by the NVT that references CVEs.

use std::collections::BTreeMap;

use crate::models::collection::{CollectionCounts, CollectionList};
use crate::models::cve::{referenced_cves, ReportCve};
use crate::models::filter::Filter;
use crate::models::report::Report;
use crate::models::xml;

/// Build the CVEs collection.
///
/// Only results whose NVT carries at least one `cve`-typed reference
/// participate. Survivors are grouped by NVT OID — not by CVE id — and each
/// group accumulates its host set, maximum severity, and occurrence count.
/// No server-side total exists for this view, so `all` equals the number of
/// groups.
pub fn parse_cves(report: &Report, filter: &Filter) -> CollectionList<ReportCve> {
    let Some(results) = report.results.as_ref() else {
        return CollectionList::empty(filter);
    };

    let mut by_oid: BTreeMap<String, ReportCve> = BTreeMap::new();
    for result in xml::elements(results.result.as_ref()) {
        let Some(nvt) = result.nvt.as_ref() else {
            continue;
        };
        let Some(oid) = nvt.oid.as_deref() else {
            continue;
        };
        if referenced_cves(nvt).is_empty() {
            continue;
        }
        by_oid
            .entry(oid.to_string())
            .or_insert_with(|| ReportCve::from_nvt(oid, nvt))
            .add_result(result);
    }

    let entities: Vec<ReportCve> = by_oid.into_values().collect();
    let counts = CollectionCounts::for_entities(entities.len(), None);
    CollectionList::new(entities, counts, filter)
}
