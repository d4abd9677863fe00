//! Error type for the report-decoding boundary.
//!
//! Only turning raw bytes into a [`crate::models::report::Report`] can fail.
//! The aggregate parsers themselves never error: malformed fields degrade to
//! absent values and missing sub-trees short-circuit to the empty placeholder
//! collection.

/// Errors produced while decoding a raw report document.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Invalid report document: {0}")]
    Decode(#[from] serde_json::Error),
}
