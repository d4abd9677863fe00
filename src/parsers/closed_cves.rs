//! Closed-CVEs view: per-host CVEs reported fixed by a detection source.

use std::collections::BTreeMap;

use crate::models::closed_cve::ClosedCve;
use crate::models::collection::{CollectionCounts, CollectionList};
use crate::models::filter::Filter;
use crate::models::host::HostRef;
use crate::models::report::Report;
use crate::models::xml;

/// Build the closed-CVEs collection.
///
/// Each host detail named `Closed CVE...` carries a comma-separated list of
/// CVE ids in its value and the severity in its `extra` field; every id
/// becomes its own entity keyed by `"<cveId>-<hostIp>-<sourceName>"`. A
/// `hostname` detail on the same host back-fills the host name once the
/// whole detail list has been scanned, since it may come after the Closed
/// CVE details. The server-side `closed_cves.count` counts at a different
/// granularity than the exploded per-CVE-per-host entities and is not used
/// for `all`.
pub fn parse_closed_cves(report: &Report, filter: &Filter) -> CollectionList<ClosedCve> {
    if report.closed_cves.is_none() {
        return CollectionList::empty(filter);
    }

    let mut entities: Vec<ClosedCve> = Vec::new();
    for host in xml::elements(report.host.as_ref()) {
        let ip = host.ip.clone().unwrap_or_default();
        let asset_id = host
            .asset
            .as_ref()
            .and_then(|asset| asset.asset_id.as_deref())
            .filter(|id| !id.is_empty())
            .map(String::from);

        let mut hostname: Option<String> = None;
        let mut host_cves: BTreeMap<String, ClosedCve> = BTreeMap::new();
        for detail in xml::elements(host.detail.as_ref()) {
            let Some(name) = detail.name.as_deref() else {
                continue;
            };
            if name.starts_with("Closed CVE") {
                let severity = detail
                    .extra
                    .as_deref()
                    .and_then(|extra| extra.trim().parse::<f64>().ok());
                let source_name = detail
                    .source
                    .as_ref()
                    .and_then(|source| source.name.as_deref())
                    .unwrap_or_default();
                for cve_id in detail.value.as_deref().unwrap_or_default().split(',') {
                    let cve_id = cve_id.trim();
                    if cve_id.is_empty() {
                        continue;
                    }
                    let key = format!("{cve_id}-{ip}-{source_name}");
                    match host_cves.get_mut(&key) {
                        Some(existing) => existing.merge_severity(severity),
                        None => {
                            host_cves.insert(
                                key.clone(),
                                ClosedCve {
                                    id: key,
                                    cve_id: cve_id.to_string(),
                                    host: HostRef {
                                        ip: Some(ip.clone()),
                                        name: None,
                                        id: asset_id.clone(),
                                    },
                                    source: detail.source.clone(),
                                    severity,
                                },
                            );
                        }
                    }
                }
            } else if name == "hostname" {
                hostname = detail.value.clone();
            }
        }

        let mut host_entities: Vec<ClosedCve> = host_cves.into_values().collect();
        if let Some(hostname) = hostname {
            for cve in &mut host_entities {
                cve.host.name = Some(hostname.clone());
            }
        }
        entities.extend(host_entities);
    }

    let counts = CollectionCounts::for_entities(entities.len(), None);
    CollectionList::new(entities, counts, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn report(value: serde_json::Value) -> Report {
        Report::from_value(value).unwrap()
    }

    #[test]
    fn empty_when_closed_cves_not_requested() {
        let list = parse_closed_cves(
            &report(json!({"host": {"ip": "10.0.0.1"}})),
            &Filter::default(),
        );
        assert!(list.entities.is_empty());
        assert_eq!(list.counts, CollectionCounts::empty());
    }

    #[test]
    fn splits_comma_separated_cve_list() {
        let list = parse_closed_cves(
            &report(json!({
                "closed_cves": {"count": 4},
                "host": {
                    "ip": "10.0.0.1",
                    "asset": {"_asset_id": "a-1"},
                    "detail": [
                        {
                            "name": "Closed CVE",
                            "value": "CVE-2000-1234,CVE-2000-5678",
                            "extra": "5.5",
                            "source": {"name": "openvas", "type": "nvt"},
                        },
                        {"name": "hostname", "value": "web01"},
                    ],
                },
            })),
            &Filter::default(),
        );

        assert_eq!(list.entities.len(), 2);
        let first = &list.entities[0];
        assert_eq!(first.id, "CVE-2000-1234-10.0.0.1-openvas");
        assert_eq!(first.cve_id, "CVE-2000-1234");
        assert_eq!(first.host.ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(first.host.id.as_deref(), Some("a-1"));
        // hostname detail came after the Closed CVE detail and is back-filled.
        assert_eq!(first.host.name.as_deref(), Some("web01"));
        assert_eq!(first.severity, Some(5.5));
        assert_eq!(list.entities[1].cve_id, "CVE-2000-5678");
        assert_eq!(list.counts.filtered, 2);
        assert_eq!(list.counts.length, 2);
    }

    // Pins the severity collision rule: when the same source lists a CVE
    // twice for one host, the lower severity wins.
    #[test]
    fn collision_keeps_lower_severity() {
        let list = parse_closed_cves(
            &report(json!({
                "closed_cves": {"count": 2},
                "host": {
                    "ip": "10.0.0.1",
                    "detail": [
                        {
                            "name": "Closed CVE",
                            "value": "CVE-2000-1234",
                            "extra": "9.0",
                            "source": {"name": "openvas"},
                        },
                        {
                            "name": "Closed CVE",
                            "value": "CVE-2000-1234",
                            "extra": "3.0",
                            "source": {"name": "openvas"},
                        },
                    ],
                },
            })),
            &Filter::default(),
        );
        assert_eq!(list.entities.len(), 1);
        assert_eq!(list.entities[0].severity, Some(3.0));
    }

    #[test]
    fn distinct_sources_do_not_collide() {
        let list = parse_closed_cves(
            &report(json!({
                "closed_cves": {"count": 2},
                "host": {
                    "ip": "10.0.0.1",
                    "detail": [
                        {"name": "Closed CVE", "value": "CVE-2000-1234", "source": {"name": "src-a"}},
                        {"name": "Closed CVE", "value": "CVE-2000-1234", "source": {"name": "src-b"}},
                    ],
                },
            })),
            &Filter::default(),
        );
        assert_eq!(list.entities.len(), 2);
    }

    #[test]
    fn concatenates_across_hosts() {
        let list = parse_closed_cves(
            &report(json!({
                "closed_cves": {"count": 2},
                "host": [
                    {"ip": "10.0.0.1", "detail": {"name": "Closed CVE", "value": "CVE-2000-1234"}},
                    {"ip": "10.0.0.2", "detail": {"name": "Closed CVE", "value": "CVE-2000-1234"}},
                ],
            })),
            &Filter::default(),
        );
        assert_eq!(list.entities.len(), 2);
        assert_eq!(list.entities[0].host.ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(list.entities[1].host.ip.as_deref(), Some("10.0.0.2"));
    }
}
