//! Apps view: detected applications keyed by CPE.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::app::ReportApp;
use crate::models::collection::{CollectionCounts, CollectionList};
use crate::models::filter::Filter;
use crate::models::report::Report;
use crate::models::xml;

/// Host detail names that identify an application CPE.
static APP_CPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^cpe:/a").expect("application cpe pattern"));

/// Build the apps collection.
///
/// Two passes: first every result's detection details named `product` are
/// scanned to compute the maximum severity per CPE; then every host's detail
/// list attaches hosts to their `App` CPEs (seeded with that severity) and
/// tallies per-CPE detail occurrences. An app whose CPE has such a detail
/// tally was confirmed by detection details; one without was only inferred
/// from a host-level product tag.
pub fn parse_apps(report: &Report, filter: &Filter) -> CollectionList<ReportApp> {
    if report.apps.is_none() || report.results.is_none() {
        return CollectionList::empty(filter);
    }

    // Pass 1: maximum severity per CPE across all detecting results.
    let mut severities: BTreeMap<String, f64> = BTreeMap::new();
    let results = report.results.as_ref().and_then(|r| r.result.as_ref());
    for result in xml::elements(results) {
        let Some(severity) = result.severity else {
            continue;
        };
        let details = result
            .detection
            .as_ref()
            .and_then(|detection| detection.result.as_ref())
            .and_then(|result| result.details.as_ref())
            .and_then(|details| details.detail.as_ref());
        for detail in xml::elements(details) {
            if detail.name.as_deref() != Some("product") {
                continue;
            }
            let Some(cpe) = detail.value.as_deref() else {
                continue;
            };
            match severities.get_mut(cpe) {
                Some(current) if *current >= severity => {}
                Some(current) => *current = severity,
                None => {
                    severities.insert(cpe.to_string(), severity);
                }
            }
        }
    }

    // Pass 2: attach hosts and tally per-CPE host detail occurrences.
    let mut by_cpe: BTreeMap<String, ReportApp> = BTreeMap::new();
    let mut detail_tallies: BTreeMap<String, u64> = BTreeMap::new();
    for host in xml::elements(report.host.as_ref()) {
        for detail in xml::elements(host.detail.as_ref()) {
            let (Some(name), Some(value)) = (detail.name.as_deref(), detail.value.as_deref())
            else {
                continue;
            };
            if name == "App" {
                let app = by_cpe
                    .entry(value.to_string())
                    .or_insert_with(|| ReportApp::new(value, severities.get(value).copied()));
                if let Some(ip) = host.ip.as_deref() {
                    app.add_host(ip);
                }
            } else if APP_CPE.is_match(name) {
                *detail_tallies.entry(name.to_string()).or_insert(0) += 1;
            }
        }
    }

    let entities: Vec<ReportApp> = by_cpe
        .into_values()
        .map(|mut app| {
            app.add_occurrence(detail_tallies.get(&app.id).copied());
            app
        })
        .collect();

    let all = report.apps.as_ref().and_then(|node| node.count);
    let counts = CollectionCounts::for_entities(entities.len(), all);
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
    fn empty_when_apps_or_results_missing() {
        let filter = Filter::default();
        assert!(parse_apps(&report(json!({"apps": {"count": 3}})), &filter)
            .entities
            .is_empty());
        assert!(
            parse_apps(&report(json!({"results": {"result": []}})), &filter)
                .entities
                .is_empty()
        );
    }

    #[test]
    fn seeds_severity_from_detection_details() {
        let list = parse_apps(
            &report(json!({
                "apps": {"count": 2},
                "results": {"result": [
                    {
                        "severity": 4.0,
                        "detection": {"result": {"details": {"detail": [
                            {"name": "product", "value": "cpe:/a:openbsd:openssh:9.6"},
                        ]}}},
                    },
                    {
                        "severity": 9.8,
                        "detection": {"result": {"details": {"detail": {
                            "name": "product", "value": "cpe:/a:openbsd:openssh:9.6",
                        }}}},
                    },
                ]},
                "host": {
                    "ip": "10.0.0.1",
                    "detail": [
                        {"name": "App", "value": "cpe:/a:openbsd:openssh:9.6"},
                        {"name": "cpe:/a:openbsd:openssh:9.6", "value": "/usr/sbin/sshd"},
                        {"name": "cpe:/a:openbsd:openssh:9.6", "value": "/usr/bin/ssh"},
                    ],
                },
            })),
            &Filter::default(),
        );

        assert_eq!(list.entities.len(), 1);
        let app = &list.entities[0];
        assert_eq!(app.id, "cpe:/a:openbsd:openssh:9.6");
        assert_eq!(app.severity, Some(9.8));
        assert_eq!(app.host_count(), 1);
        assert_eq!(app.occurrences.details, 2);
        assert_eq!(app.occurrences.without_details, 0);
        assert_eq!(list.counts.all, 2);
        assert_eq!(list.counts.filtered, 1);
    }

    #[test]
    fn app_without_detail_tally_counts_once_without_details() {
        let list = parse_apps(
            &report(json!({
                "apps": {"count": 1},
                "results": {"result": []},
                "host": {
                    "ip": "10.0.0.1",
                    "detail": {"name": "App", "value": "cpe:/a:vendor:tool"},
                },
            })),
            &Filter::default(),
        );
        let app = &list.entities[0];
        assert_eq!(app.severity, None);
        assert_eq!(app.occurrences.details, 0);
        assert_eq!(app.occurrences.without_details, 1);
        assert_eq!(app.occurrences.total, 1);
    }

    #[test]
    fn hosts_accumulate_across_elements() {
        let list = parse_apps(
            &report(json!({
                "apps": {"count": 1},
                "results": {"result": []},
                "host": [
                    {"ip": "10.0.0.1", "detail": {"name": "App", "value": "cpe:/a:vendor:tool"}},
                    {"ip": "10.0.0.2", "detail": {"name": "App", "value": "cpe:/a:vendor:tool"}},
                ],
            })),
            &Filter::default(),
        );
        assert_eq!(list.entities.len(), 1);
        assert_eq!(list.entities[0].host_count(), 2);
    }
}
