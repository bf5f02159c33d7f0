//! Shared test doubles and fixtures for the Folio chapter engine.

mod clock;
mod content;
mod switcher;

pub use clock::{FixedClock, ManualClock, t0};
pub use content::{catalog, chapter, config, config_with_timings, stage, step};
pub use switcher::RecordingChapterSwitcher;
