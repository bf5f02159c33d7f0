//! Test switcher — records chapter switch requests.

use std::sync::Mutex;

use folio_core::navigation::{ChapterSwitch, ChapterSwitcher};

/// A chapter switcher that records every request and applies none.
#[derive(Debug, Default)]
pub struct RecordingChapterSwitcher {
    requests: Mutex<Vec<ChapterSwitch>>,
}

impl RecordingChapterSwitcher {
    /// Creates a switcher with no recorded requests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all requests received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<ChapterSwitch> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChapterSwitcher for RecordingChapterSwitcher {
    fn switch_to(&self, request: ChapterSwitch) {
        self.requests.lock().unwrap().push(request);
    }
}
