//! Folio Core — shared abstractions.
//!
//! Time, timers, events, errors and the chapter-switch sink that the content,
//! engine and host crates all depend on. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod event;
pub mod navigation;
pub mod timer;
