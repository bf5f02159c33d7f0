//! Player configuration read from the environment.

use std::path::PathBuf;

use crate::error::AppError;

/// How chapter views are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// A short human-readable frame whenever the phase or position changes.
    #[default]
    Text,
    /// One JSON view per line on every visible change.
    Json,
}

/// How log lines are formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Settings for one player run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlayerConfig {
    /// YAML catalog to load instead of the built-in content.
    pub content_path: Option<PathBuf>,
    /// Chapter shown first instead of the catalog's first chapter.
    pub start_chapter: Option<String>,
    pub output: OutputFormat,
    pub log_format: LogFormat,
}

impl PlayerConfig {
    /// Reads `FOLIO_CONTENT`, `FOLIO_START_CHAPTER`, `FOLIO_OUTPUT` and
    /// `FOLIO_LOG_FORMAT`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a format variable has an unknown value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a format variable has an unknown value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let output = match non_empty("FOLIO_OUTPUT").as_deref().map(str::trim) {
            None | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "FOLIO_OUTPUT must be `text` or `json`, got `{other}`"
                )));
            }
        };
        let log_format = match non_empty("FOLIO_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "FOLIO_LOG_FORMAT must be `json` or `pretty`, got `{other}`"
                )));
            }
        };

        Ok(Self {
            content_path: non_empty("FOLIO_CONTENT").map(PathBuf::from),
            start_chapter: non_empty("FOLIO_START_CHAPTER"),
            output,
            log_format,
        })
    }
}
