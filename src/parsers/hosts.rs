//! Hosts view: one entity per scanned host with its severity roll-up.

use tracing::debug;

use crate::models::collection::{CollectionCounts, CollectionList};
use crate::models::filter::Filter;
use crate::models::host::ReportHost;
use crate::models::report::Report;
use crate::models::xml;
use crate::parsers::severity;

/// Build the hosts collection.
///
/// Returns the empty placeholder unless host data was requested (host
/// elements or a `hosts` count node) together with results — an absent
/// `results` key means details were never loaded, which is not the same as
/// a scan with zero results. Each host's severity is the maximum severity of
/// the results referencing its IP.
pub fn parse_hosts(report: &Report, filter: &Filter) -> CollectionList<ReportHost> {
    if (report.host.is_none() && report.hosts.is_none()) || report.results.is_none() {
        return CollectionList::empty(filter);
    }

    let severities = severity::host_severities(report.results.as_ref());
    let entities: Vec<ReportHost> = xml::elements(report.host.as_ref())
        .iter()
        .map(|element| {
            let severity = element
                .ip
                .as_deref()
                .and_then(|ip| severities.get(ip).copied());
            ReportHost::from_element(element, severity)
        })
        .collect();
    debug!(hosts = entities.len(), "parsed hosts view");

    let all = report.hosts.as_ref().and_then(|node| node.count);
    let counts = CollectionCounts::for_entities(entities.len(), all);
    CollectionList::new(entities, counts, filter)
}
