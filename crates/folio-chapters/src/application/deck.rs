//! The set of chapters on the page and which one is in view.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_content::domain::catalog::Catalog;
use folio_core::clock::Clock;
use folio_core::navigation::ChapterSwitcher;
use tracing::{debug, info};
use uuid::Uuid;

use super::coordinator::ChapterCoordinator;
use crate::domain::events::SequencerEvent;

/// One coordinator per catalog chapter, at most one of them visible.
///
/// Only the visible chapter plays. Showing another chapter deactivates the
/// visible one before the new one is activated.
#[derive(Debug)]
pub struct ChapterDeck {
    chapters: Vec<ChapterCoordinator>,
    visible: Option<usize>,
}

impl ChapterDeck {
    /// Builds a coordinator for every chapter in `catalog`. Nothing is
    /// visible until [`start`](Self::start) or [`show`](Self::show).
    #[must_use]
    pub fn new(catalog: &Catalog, switcher: &Arc<dyn ChapterSwitcher>) -> Self {
        let chapters = catalog
            .chapters()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let (previous, next) = catalog.neighbours(i);
                ChapterCoordinator::new(entry, previous, next, Arc::clone(switcher))
            })
            .collect();
        Self {
            chapters,
            visible: None,
        }
    }

    /// Shows the first chapter.
    pub fn start(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Vec<SequencerEvent> {
        let Some(first) = self.chapters.first().map(|c| c.key().to_owned()) else {
            return Vec::new();
        };
        self.show(&first, correlation_id, clock)
    }

    /// Makes `key` the visible chapter. Unknown keys and the chapter already
    /// in view are ignored.
    pub fn show(&mut self, key: &str, correlation_id: Uuid, clock: &dyn Clock) -> Vec<SequencerEvent> {
        let Some(target) = self.chapters.iter().position(|c| c.key() == key) else {
            debug!(chapter = key, "ignoring unknown chapter");
            return Vec::new();
        };
        if self.visible == Some(target) {
            return Vec::new();
        }

        let mut events = match self.visible.and_then(|i| self.chapters.get_mut(i)) {
            Some(current) => current.deactivate(correlation_id, clock),
            None => Vec::new(),
        };
        self.visible = Some(target);
        events.extend(self.chapters[target].activate(correlation_id, clock));
        info!(chapter = key, "chapter in view");
        events
    }

    /// The chapter in view.
    #[must_use]
    pub fn visible(&self) -> Option<&ChapterCoordinator> {
        self.visible.map(|i| &self.chapters[i])
    }

    /// Mutable access to the chapter in view, for command handling.
    pub fn visible_mut(&mut self) -> Option<&mut ChapterCoordinator> {
        self.visible.map(|i| &mut self.chapters[i])
    }

    /// The chapter with `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ChapterCoordinator> {
        self.chapters.iter().find(|c| c.key() == key)
    }

    /// All chapters in page order.
    #[must_use]
    pub fn chapters(&self) -> &[ChapterCoordinator] {
        &self.chapters
    }

    /// Fires the visible chapter's due timers.
    pub fn tick(&mut self, clock: &dyn Clock) -> Vec<SequencerEvent> {
        self.visible_mut()
            .map(|c| c.tick(clock))
            .unwrap_or_default()
    }

    /// When the visible chapter next needs a tick.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.visible().and_then(ChapterCoordinator::next_deadline)
    }
}
