//! The ordered set of chapters that make up the site.

use std::collections::HashSet;

use folio_core::error::DomainError;

use super::chapter::ChapterConfig;
use super::quiz::Quiz;

/// One full-page chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterEntry {
    /// Identifier used for chapter switching.
    pub key: String,
    /// Human-readable title.
    pub title: String,
    /// The stages this chapter plays.
    pub config: ChapterConfig,
    /// Quiz records, for chapters compiled from quizzes. Empty otherwise.
    pub quizzes: Vec<Quiz>,
}

/// Chapters in page order. Order defines which chapter a hand-off moves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    chapters: Vec<ChapterEntry>,
}

impl Catalog {
    /// Builds a catalog.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if there are no chapters and
    /// `DomainError::DuplicateChapter` if two chapters share a key.
    pub fn new(chapters: Vec<ChapterEntry>) -> Result<Self, DomainError> {
        if chapters.is_empty() {
            return Err(DomainError::Validation(
                "catalog has no chapters".to_owned(),
            ));
        }
        let mut seen = HashSet::new();
        for chapter in &chapters {
            if !seen.insert(chapter.key.as_str()) {
                return Err(DomainError::DuplicateChapter(chapter.key.clone()));
            }
        }
        Ok(Self { chapters })
    }

    /// All chapters in page order.
    #[must_use]
    pub fn chapters(&self) -> &[ChapterEntry] {
        &self.chapters
    }

    /// The chapter with `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ChapterEntry> {
        self.chapters.iter().find(|c| c.key == key)
    }

    /// Keys of the chapters before and after the one at `index`.
    #[must_use]
    pub fn neighbours(&self, index: usize) -> (Option<&str>, Option<&str>) {
        let previous = index
            .checked_sub(1)
            .and_then(|i| self.chapters.get(i))
            .map(|c| c.key.as_str());
        let next = self.chapters.get(index + 1).map(|c| c.key.as_str());
        (previous, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chapter::{Stage, Step, Timings};

    fn entry(key: &str) -> ChapterEntry {
        ChapterEntry {
            key: key.to_owned(),
            title: key.to_uppercase(),
            config: ChapterConfig::new(
                vec![Stage::new("only", vec![Step::new("t", "b")])],
                Timings::default(),
            )
            .unwrap(),
            quizzes: Vec::new(),
        }
    }

    #[test]
    fn test_new_rejects_empty_catalog() {
        assert!(matches!(
            Catalog::new(Vec::new()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_new_rejects_duplicate_chapter_keys() {
        let result = Catalog::new(vec![entry("landing"), entry("landing")]);

        assert_eq!(
            result.unwrap_err(),
            DomainError::DuplicateChapter("landing".to_owned())
        );
    }

    #[test]
    fn test_neighbours_at_edges_and_middle() {
        let catalog = Catalog::new(vec![entry("landing"), entry("design"), entry("work")]).unwrap();

        assert_eq!(catalog.neighbours(0), (None, Some("design")));
        assert_eq!(catalog.neighbours(1), (Some("landing"), Some("work")));
        assert_eq!(catalog.neighbours(2), (Some("design"), None));
        assert_eq!(catalog.get("design").map(|c| c.title.as_str()), Some("DESIGN"));
    }
}
