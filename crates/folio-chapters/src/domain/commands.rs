//! Commands accepted by a chapter.

use uuid::Uuid;

/// Trait that all chapter commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command and the playback it starts.
    fn correlation_id(&self) -> Uuid;
}

/// Manual "next": show the following step instantly.
#[derive(Debug, Clone)]
pub struct AdvanceStep {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Manual "previous": show the preceding step instantly.
#[derive(Debug, Clone)]
pub struct RetreatStep {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Select a stage from the nav bar and type it from its first step.
#[derive(Debug, Clone)]
pub struct JumpToStage {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Key of the stage to show.
    pub stage_key: String,
}

/// The play/pause control.
#[derive(Debug, Clone)]
pub struct TogglePlayPause {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Restart the chapter from its first step in autoplay.
#[derive(Debug, Clone)]
pub struct Replay {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

/// Pick an option of a quiz question.
#[derive(Debug, Clone)]
pub struct AnswerQuestion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The quiz answered.
    pub quiz_id: String,
    /// Zero-based index of the chosen option.
    pub option_index: usize,
}

/// Forget the answer to one quiz question so it can be tried again.
#[derive(Debug, Clone)]
pub struct ReplayQuestion {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The quiz to reset.
    pub quiz_id: String,
}

macro_rules! impl_command {
    ($($ty:ident => $name:literal),+ $(,)?) => {
        $(
            impl Command for $ty {
                fn command_type(&self) -> &'static str {
                    $name
                }

                fn correlation_id(&self) -> Uuid {
                    self.correlation_id
                }
            }
        )+
    };
}

impl_command! {
    AdvanceStep => "chapter.advance_step",
    RetreatStep => "chapter.retreat_step",
    JumpToStage => "chapter.jump_to_stage",
    TogglePlayPause => "chapter.toggle_play_pause",
    Replay => "chapter.replay",
    AnswerQuestion => "chapter.answer_question",
    ReplayQuestion => "chapter.replay_question",
}
