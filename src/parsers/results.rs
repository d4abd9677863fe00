//! Results view with its three-valued loading contract.

use serde::Serialize;
use tracing::debug;

use crate::models::collection::{CollectionCounts, CollectionList};
use crate::models::filter::Filter;
use crate::models::report::Report;
use crate::models::result::ScanResult;
use crate::models::xml;

/// Outcome of the results view, distinguishing "not yet loaded" from
/// "loaded empty".
///
/// Callers keep a loading indicator up on [`ParsedResults::NotRequested`];
/// an empty `Loaded` collection means the scan genuinely produced no
/// results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ParsedResults {
    NotRequested,
    Loaded(CollectionList<ScanResult>),
}

impl ParsedResults {
    pub fn is_requested(&self) -> bool {
        !matches!(self, Self::NotRequested)
    }

    pub fn into_loaded(self) -> Option<CollectionList<ScanResult>> {
        match self {
            Self::Loaded(list) => Some(list),
            Self::NotRequested => None,
        }
    }
}

/// Build the results collection.
///
/// `NotRequested` when none of `results`, `result_count` and
/// `compliance_count` are present. Counts come from the server-paged nodes:
/// the `_start` attribute becomes `first`, and `all` prefers the unfiltered
/// `full` total, which delta reports do not carry, over `filtered`.
pub fn parse_results(report: &Report, filter: &Filter) -> ParsedResults {
    if report.results.is_none()
        && report.result_count.is_none()
        && report.compliance_count.is_none()
    {
        return ParsedResults::NotRequested;
    }

    let entities: Vec<ScanResult> =
        xml::elements(report.results.as_ref().and_then(|r| r.result.as_ref()))
            .iter()
            .map(ScanResult::from_element)
            .collect();
    debug!(results = entities.len(), "parsed results view");

    let length = entities.len() as u64;
    let count_node = report
        .result_count
        .as_ref()
        .or(report.compliance_count.as_ref());
    let counts = CollectionCounts {
        all: count_node
            .and_then(|node| node.full.or(node.filtered))
            .unwrap_or(length),
        filtered: count_node.and_then(|node| node.filtered).unwrap_or(length),
        first: report
            .results
            .as_ref()
            .and_then(|results| results.start)
            .unwrap_or(1),
        length,
        rows: length,
    };
    ParsedResults::Loaded(CollectionList::new(entities, counts, filter))
}
