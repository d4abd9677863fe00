//! Operating-systems view: detected OSes keyed by `best_os_cpe`.

use std::collections::BTreeMap;

use crate::models::collection::{CollectionCounts, CollectionList};
use crate::models::filter::Filter;
use crate::models::host::ComplianceStatus;
use crate::models::operating_system::ReportOperatingSystem;
use crate::models::report::Report;
use crate::models::xml;
use crate::parsers::severity;

/// Build the operating-systems collection.
///
/// Each host contributes its `best_os_cpe`/`best_os_txt` detail values; hosts
/// sharing a CPE merge into one entity carrying the host set, the maximum
/// host severity, and (for audit reports) the per-host compliance verdict.
pub fn parse_operating_systems(
    report: &Report,
    filter: &Filter,
) -> CollectionList<ReportOperatingSystem> {
    if report.os.is_none() || report.results.is_none() {
        return CollectionList::empty(filter);
    }

    let severities = severity::host_severities(report.results.as_ref());
    let mut by_cpe: BTreeMap<String, ReportOperatingSystem> = BTreeMap::new();
    for host in xml::elements(report.host.as_ref()) {
        let Some(ip) = host.ip.as_deref() else {
            continue;
        };
        let mut best_os_cpe = None;
        let mut best_os_txt = None;
        for detail in xml::elements(host.detail.as_ref()) {
            match detail.name.as_deref() {
                Some("best_os_cpe") => best_os_cpe = detail.value.as_deref(),
                Some("best_os_txt") => best_os_txt = detail.value.as_deref(),
                _ => {}
            }
        }
        let Some(cpe) = best_os_cpe else {
            continue;
        };
        let os = by_cpe
            .entry(cpe.to_string())
            .or_insert_with(|| ReportOperatingSystem::new(cpe, best_os_txt));
        os.add_host(ip);
        os.set_severity_if_larger(severities.get(ip).copied());
        if let Some(compliance) = host.host_compliance.as_deref() {
            os.set_host_compliance(ip, ComplianceStatus::from_text(Some(compliance)));
        }
    }

    let entities: Vec<ReportOperatingSystem> = by_cpe.into_values().collect();
    let all = report.os.as_ref().and_then(|node| node.count);
    let counts = CollectionCounts::for_entities(entities.len(), all);
    CollectionList::new(entities, counts, filter)
}
