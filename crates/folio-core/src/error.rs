//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Content errors are raised while a catalog or chapter configuration is
/// built, so malformed content is rejected at startup rather than surfacing
/// as broken animation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A chapter was configured without any stages.
    #[error("chapter has no stages")]
    EmptyChapter,

    /// A stage was configured without any steps.
    #[error("stage `{0}` has no steps")]
    EmptyStage(String),

    /// Two stages in one chapter share a key.
    #[error("duplicate stage key `{0}`")]
    DuplicateStage(String),

    /// Two chapters in one catalog share a key.
    #[error("duplicate chapter key `{0}`")]
    DuplicateChapter(String),

    /// A quiz answer referenced a quiz that does not exist.
    #[error("unknown quiz `{0}`")]
    UnknownQuiz(String),

    /// A quiz answer referenced an option index out of range.
    #[error("quiz `{quiz_id}` has no option {index}")]
    UnknownOption {
        /// The quiz that was answered.
        quiz_id: String,
        /// The out-of-range option index.
        index: usize,
    },

    /// A quiz was answered while another stage was on screen.
    #[error("quiz `{0}` is not the question on screen")]
    QuizNotOnScreen(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// Content could not be parsed.
    #[error("content error: {0}")]
    Content(String),
}
