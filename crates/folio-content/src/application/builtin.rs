//! The portfolio content shipped with the engine.

use folio_core::error::DomainError;

use super::ingest::{IngestedCatalog, ingest_catalog};

/// Source of the built-in catalog: the landing intro, the design walkthrough
/// and the work quiz.
pub const PORTFOLIO_YAML: &str = include_str!("../../content/portfolio.yaml");

/// Ingests the built-in catalog.
///
/// # Errors
///
/// Returns the errors of [`ingest_catalog`]; the shipped content is covered by
/// tests, so this only fails if the file is edited into an invalid state.
pub fn portfolio() -> Result<IngestedCatalog, DomainError> {
    ingest_catalog(PORTFOLIO_YAML)
}
