//! YAML catalog ingestion.
//!
//! A catalog document lists chapters in page order. Each chapter carries
//! either explicit `stages`, or an `intro` step plus `quizzes` that are
//! compiled into one stage per question.

use std::collections::HashSet;
use std::path::Path;

use folio_core::error::DomainError;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::domain::catalog::{Catalog, ChapterEntry};
use crate::domain::chapter::{ChapterConfig, Stage, Step, Timings};
use crate::domain::quiz::Quiz;

/// Key of the stage that opens a quiz chapter.
pub const QUIZ_START_STAGE: &str = "Start";

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    chapters: Vec<ChapterDocument>,
}

#[derive(Debug, Deserialize)]
struct ChapterDocument {
    key: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    timings: Timings,
    #[serde(default)]
    stages: Vec<Stage>,
    #[serde(default)]
    intro: Option<Step>,
    #[serde(default)]
    quizzes: Vec<Quiz>,
}

/// A validated catalog together with the hash of the source it came from.
#[derive(Debug, Clone)]
pub struct IngestedCatalog {
    /// The validated catalog.
    pub catalog: Catalog,
    /// Hex SHA-256 of the source text.
    pub version_hash: String,
}

/// Parses and validates a YAML catalog.
///
/// # Errors
///
/// Returns `DomainError::Content` if the YAML is malformed or a chapter is
/// invalid, and `DomainError::DuplicateChapter` or `DomainError::Validation`
/// if the chapter list itself is invalid.
pub fn ingest_catalog(source: &str) -> Result<IngestedCatalog, DomainError> {
    let document: CatalogDocument = serde_yaml::from_str(source)
        .map_err(|e| DomainError::Content(format!("catalog parse failed: {e}")))?;

    let chapters = document
        .chapters
        .into_iter()
        .map(compile_chapter)
        .collect::<Result<Vec<_>, _>>()?;
    let catalog = Catalog::new(chapters)?;
    let version_hash = format!("{:x}", Sha256::digest(source.as_bytes()));

    info!(
        chapters = catalog.chapters().len(),
        version_hash = %version_hash,
        "ingested content catalog"
    );

    Ok(IngestedCatalog {
        catalog,
        version_hash,
    })
}

/// Reads and ingests a YAML catalog from disk.
///
/// # Errors
///
/// Returns `DomainError::Content` if the file cannot be read, otherwise the
/// errors of [`ingest_catalog`].
pub fn ingest_catalog_file(path: &Path) -> Result<IngestedCatalog, DomainError> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Content(format!("cannot read {}: {e}", path.display())))?;
    ingest_catalog(&source)
}

fn compile_chapter(document: ChapterDocument) -> Result<ChapterEntry, DomainError> {
    let ChapterDocument {
        key,
        title,
        timings,
        stages,
        intro,
        quizzes,
    } = document;

    let stages = if quizzes.is_empty() {
        if intro.is_some() {
            return Err(DomainError::Content(format!(
                "chapter `{key}`: `intro` is only valid alongside `quizzes`"
            )));
        }
        stages
    } else {
        if !stages.is_empty() {
            return Err(DomainError::Content(format!(
                "chapter `{key}`: use either `stages` or `quizzes`, not both"
            )));
        }
        validate_quizzes(&key, &quizzes)?;
        quiz_stages(&title, intro, &quizzes)
    };

    let config = ChapterConfig::new(stages, timings)
        .map_err(|e| DomainError::Content(format!("chapter `{key}`: {e}")))?;

    Ok(ChapterEntry {
        title: if title.is_empty() { key.clone() } else { title },
        key,
        config,
        quizzes,
    })
}

/// Every quiz needs its own id and something to pick.
fn validate_quizzes(key: &str, quizzes: &[Quiz]) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for quiz in quizzes {
        if !seen.insert(quiz.id.as_str()) {
            return Err(DomainError::Content(format!(
                "chapter `{key}`: duplicate quiz id `{}`",
                quiz.id
            )));
        }
        if quiz.options.is_empty() {
            return Err(DomainError::Content(format!(
                "chapter `{key}`: quiz `{}` has no options",
                quiz.id
            )));
        }
    }
    Ok(())
}

/// A start stage followed by one single-step stage per question.
fn quiz_stages(title: &str, intro: Option<Step>, quizzes: &[Quiz]) -> Vec<Stage> {
    let intro = intro.unwrap_or_else(|| Step::new(title, ""));
    std::iter::once(Stage::new(QUIZ_START_STAGE, vec![intro]))
        .chain(quizzes.iter().enumerate().map(|(i, q)| q.to_stage(i)))
        .collect()
}
