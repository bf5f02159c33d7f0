//! Application layer: command handling, read models and chapter visibility.

pub mod coordinator;
pub mod deck;
pub mod view;
