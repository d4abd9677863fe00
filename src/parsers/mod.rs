//! Aggregate view derivation over a scan report document.
//!
//! Each parser reads the sub-trees relevant to one view, folds them into a
//! keyed accumulator, and wraps the materialized entities in a
//! [`crate::models::collection::CollectionList`]. Parsers never fail: fields
//! that cannot be interpreted degrade to absent values, and a sub-tree that
//! was never requested yields the empty placeholder collection. None of them
//! mutate the report, so different views of the same document can be built
//! concurrently.

pub mod apps;
pub mod closed_cves;
pub mod cves;
pub mod errors;
pub mod hosts;
pub mod operating_systems;
pub mod ports;
pub mod results;
pub mod severity;
pub mod tls_certificates;

pub use apps::parse_apps;
pub use closed_cves::parse_closed_cves;
pub use cves::parse_cves;
pub use errors::parse_errors;
pub use hosts::parse_hosts;
pub use operating_systems::parse_operating_systems;
pub use ports::parse_ports;
pub use results::{parse_results, ParsedResults};
pub use tls_certificates::parse_tls_certificates;

use crate::models::report::Report;
use crate::models::task::ReportTask;

/// Task metadata attached to the report, when present.
pub fn parse_task(report: &Report) -> Option<ReportTask> {
    report.task.as_ref().map(ReportTask::from_element)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_task_passes_through_absence() {
        let report = Report::from_value(json!({})).unwrap();
        assert!(parse_task(&report).is_none());

        let report =
            Report::from_value(json!({"task": {"_id": "t-1", "name": "Weekly scan"}})).unwrap();
        let task = parse_task(&report).unwrap();
        assert_eq!(task.id.as_deref(), Some("t-1"));
        assert_eq!(task.name.as_deref(), Some("Weekly scan"));
    }
}
