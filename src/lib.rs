//! Aggregate view derivation over vulnerability scan reports.
//!
//! A scan report arrives as the JSON conversion of a deeply nested XML
//! document: repeatable elements collapse to single objects, attributes
//! become `_`-prefixed keys, text content lands under `__text`. This crate
//! decodes that document into a typed [`models::report::Report`] and derives
//! the independent aggregate views a management console renders — hosts,
//! ports, applications, operating systems, TLS certificates, CVEs, closed
//! CVEs, scan errors and results — each as a pure function of the document
//! plus an opaque [`Filter`] echoed into the output.

pub mod errors;
pub mod models;
pub mod parsers;

pub use errors::ReportError;
pub use models::collection::{CollectionCounts, CollectionList};
pub use models::filter::Filter;
pub use models::report::Report;
pub use parsers::{
    parse_apps, parse_closed_cves, parse_cves, parse_errors, parse_hosts,
    parse_operating_systems, parse_ports, parse_results, parse_task, parse_tls_certificates,
    ParsedResults,
};
