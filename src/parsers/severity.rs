//! Severity aggregation shared across the aggregate views.

use std::collections::BTreeMap;

use crate::models::report::ResultsElement;
use crate::models::xml;

/// Map each host IP to the maximum severity of the results referencing it.
///
/// Results without a host or without a severity contribute nothing; a stored
/// maximum only ever increases. Used by the hosts and operating-systems
/// views.
pub fn host_severities(results: Option<&ResultsElement>) -> BTreeMap<String, f64> {
    let mut severities = BTreeMap::new();
    let Some(results) = results else {
        return severities;
    };
    for result in xml::elements(results.result.as_ref()) {
        let Some(ip) = result.host.as_ref().and_then(|host| host.ip.as_deref()) else {
            continue;
        };
        let Some(severity) = result.severity else {
            continue;
        };
        match severities.get_mut(ip) {
            Some(current) if *current >= severity => {}
            Some(current) => *current = severity,
            None => {
                severities.insert(ip.to_string(), severity);
            }
        }
    }
    severities
}

/// Merge a candidate into a running maximum; `None` candidates are ignored.
pub(crate) fn max_severity(current: Option<f64>, candidate: Option<f64>) -> Option<f64> {
    match (current, candidate) {
        (Some(current), Some(candidate)) if candidate > current => Some(candidate),
        (None, candidate @ Some(_)) => candidate,
        (current, _) => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn results(value: serde_json::Value) -> ResultsElement {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn tracks_maximum_per_ip() {
        let results = results(json!({
            "result": [
                {"host": {"__text": "10.0.0.1"}, "severity": 4.0},
                {"host": {"__text": "10.0.0.1"}, "severity": 9.8},
                {"host": {"__text": "10.0.0.1"}, "severity": 7.0},
                {"host": {"__text": "10.0.0.2"}, "severity": 1.0},
            ],
        }));
        let severities = host_severities(Some(&results));
        assert_eq!(severities.get("10.0.0.1"), Some(&9.8));
        assert_eq!(severities.get("10.0.0.2"), Some(&1.0));
    }

    #[test]
    fn ignores_results_without_severity_or_host() {
        let results = results(json!({
            "result": [
                {"host": {"__text": "10.0.0.1"}},
                {"severity": 5.0},
            ],
        }));
        assert!(host_severities(Some(&results)).is_empty());
    }

    #[test]
    fn absent_results_yield_empty_map() {
        assert!(host_severities(None).is_empty());
    }

    #[test]
    fn max_severity_never_decreases() {
        assert_eq!(max_severity(Some(5.0), Some(2.0)), Some(5.0));
        assert_eq!(max_severity(Some(5.0), Some(7.5)), Some(7.5));
        assert_eq!(max_severity(None, Some(3.0)), Some(3.0));
        assert_eq!(max_severity(Some(5.0), None), Some(5.0));
        assert_eq!(max_severity(None, None), None);
    }
}
