//! Folio player — error types.

use folio_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the player.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The content catalog could not be loaded.
    #[error("content error: {0}")]
    Content(#[from] DomainError),

    /// Reading input or writing output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
