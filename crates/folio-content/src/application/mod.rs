//! Catalog ingestion.

pub mod builtin;
pub mod ingest;
