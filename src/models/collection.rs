//! Collection envelope shared by every aggregate view.

use serde::Serialize;

use crate::models::filter::Filter;

/// Pagination metadata attached to a parsed collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionCounts {
    /// Server-side total for the view, independent of what was returned.
    pub all: u64,
    /// Entities remaining after report-side grouping and dedup.
    pub filtered: u64,
    /// Index of the first entity on this page (1-based).
    pub first: u64,
    pub length: u64,
    pub rows: u64,
}

impl CollectionCounts {
    /// Zero-valued counts, used when a sub-tree was never requested.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Counts for a report-scoped view where everything produced fits one
    /// page. `all` falls back to the produced count when the server reported
    /// no total for the view.
    pub fn for_entities(length: usize, all: Option<u64>) -> Self {
        let length = length as u64;
        Self {
            all: all.unwrap_or(length),
            filtered: length,
            first: 1,
            length,
            rows: length,
        }
    }
}

/// Uniform `{entities, counts, filter}` output of every parser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionList<T> {
    pub entities: Vec<T>,
    pub counts: CollectionCounts,
    pub filter: Filter,
}

impl<T> CollectionList<T> {
    pub fn new(entities: Vec<T>, counts: CollectionCounts, filter: &Filter) -> Self {
        Self {
            entities,
            counts,
            filter: filter.clone(),
        }
    }

    /// Placeholder for views whose sub-trees were not requested.
    pub fn empty(filter: &Filter) -> Self {
        Self::new(Vec::new(), CollectionCounts::empty(), filter)
    }
}
