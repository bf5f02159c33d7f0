//! Content fixtures — small chapters built in code.

use folio_content::domain::catalog::{Catalog, ChapterEntry};
use folio_content::domain::chapter::{ChapterConfig, Stage, Step, Timings};

/// A step with the chapter's default pause.
#[must_use]
pub fn step(title: &str, body: &str) -> Step {
    Step::new(title, body)
}

/// A stage whose nav label is its key.
#[must_use]
pub fn stage(key: &str, steps: Vec<Step>) -> Stage {
    Stage::new(key, steps)
}

/// A chapter with default timings.
///
/// # Panics
///
/// Panics if the stages are invalid.
#[must_use]
pub fn config(stages: Vec<Stage>) -> ChapterConfig {
    config_with_timings(stages, Timings::default())
}

/// A chapter with the given timings.
///
/// # Panics
///
/// Panics if the stages are invalid.
#[must_use]
pub fn config_with_timings(stages: Vec<Stage>, timings: Timings) -> ChapterConfig {
    ChapterConfig::new(stages, timings).unwrap()
}

/// A catalog entry titled after its key.
#[must_use]
pub fn chapter(key: &str, config: ChapterConfig) -> ChapterEntry {
    ChapterEntry {
        key: key.to_owned(),
        title: key.to_owned(),
        config,
        quizzes: Vec::new(),
    }
}

/// A catalog of `chapters` in the given order.
///
/// # Panics
///
/// Panics if two chapters share a key or the list is empty.
#[must_use]
pub fn catalog(chapters: Vec<ChapterEntry>) -> Catalog {
    Catalog::new(chapters).unwrap()
}
