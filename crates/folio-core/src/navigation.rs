//! Cross-chapter navigation sink.

use serde::Serialize;

/// Which way a chapter hand-off moves through the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchDirection {
    /// Stepping past the last step of a chapter.
    Forward,
    /// Stepping back from the first step of a chapter.
    Backward,
}

/// A request to bring another chapter into view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterSwitch {
    /// The chapter that asked for the switch.
    pub from: String,
    /// The chapter to show.
    pub to: String,
    /// Direction of travel.
    pub direction: SwitchDirection,
}

/// Host-provided sink for "switch to chapter X" requests.
///
/// The request is not applied synchronously: the host scrolls the target
/// chapter into view, and its visibility detector later reports the change.
pub trait ChapterSwitcher: Send + Sync {
    /// Ask the host to show another chapter.
    fn switch_to(&self, request: ChapterSwitch);
}
