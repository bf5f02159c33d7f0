//! Content model.

pub mod catalog;
pub mod chapter;
pub mod quiz;
