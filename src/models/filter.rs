//! Opaque paging/sort descriptor echoed into every parsed collection.

use serde::{Deserialize, Serialize};

/// The filter that produced the current page of the report.
///
/// The parsers never interpret it; it is passed through unchanged so list
/// components can render and refine the active filter term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Filter {
    /// Raw filter term, e.g. `"severity>3.9 rows=100 sort-reverse=severity"`.
    pub term: String,
}

impl Filter {
    pub fn from_term(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }
}
