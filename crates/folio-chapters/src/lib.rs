//! Folio — chapter sequencing engine.
//!
//! Responsible for the step-by-step typewriter reveal of a chapter, autoplay
//! between stages, manual forward/backward navigation and the hand-off to
//! neighbouring chapters.

pub mod application;
pub mod domain;
