//! Raw document model and derived entity types for all report views.

pub mod app;
pub mod closed_cve;
pub mod collection;
pub mod cve;
pub mod filter;
pub mod host;
pub mod operating_system;
pub mod port;
pub mod report;
pub mod result;
pub mod scan_error;
pub mod task;
pub mod tls_certificate;
pub mod xml;
