//! Domain layer: the sequencer state machine and its events and commands.

pub mod commands;
pub mod events;
pub mod quiz;
pub mod sequencer;
pub mod typewriter;
