//! Folio player — a terminal host for the chapter engine.
//!
//! Reads commands from a line-based input, drives the visible chapter's
//! timers on a tokio loop and writes a rendering of the chapter after every
//! visible change.

pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod runner;
pub mod state;
