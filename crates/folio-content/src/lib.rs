//! Folio — chapter content.
//!
//! Steps, stages and chapter configurations, the quiz records the work
//! chapter is built from, and ingestion of the YAML catalog that ties the
//! chapters together.

pub mod application;
pub mod domain;
