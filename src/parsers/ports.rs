//! Ports view: distinct ports with host sets and severity roll-up.

use std::collections::BTreeMap;

use crate::models::collection::{CollectionCounts, CollectionList};
use crate::models::filter::Filter;
use crate::models::port::ReportPort;
use crate::models::report::Report;
use crate::models::xml;

/// Build the ports collection.
///
/// Entries whose identifier starts with `general` are synthetic host-level
/// placeholders, not real ports, and are excluded. Repeated elements for the
/// same port id merge into one entity: the first occurrence supplies the
/// threat label, later ones can only raise the severity and add hosts. The
/// result is sorted ascending by numeric port.
pub fn parse_ports(report: &Report, filter: &Filter) -> CollectionList<ReportPort> {
    let Some(ports) = report.ports.as_ref() else {
        return CollectionList::empty(filter);
    };

    let mut by_id: BTreeMap<String, ReportPort> = BTreeMap::new();
    for element in xml::elements(ports.port.as_ref()) {
        let Some(id) = element.id.as_deref() else {
            continue;
        };
        if id.starts_with("general") {
            continue;
        }
        let port = by_id
            .entry(id.to_string())
            .or_insert_with(|| ReportPort::from_element(id, element));
        port.set_severity_if_larger(element.severity);
        if let Some(host) = element.host.as_deref() {
            port.add_host(host);
        }
    }

    let mut entities: Vec<ReportPort> = by_id.into_values().collect();
    entities.sort_by_key(|port| port.number.unwrap_or(0));

    let counts = CollectionCounts::for_entities(entities.len(), ports.count);
    CollectionList::new(entities, counts, filter)
}
