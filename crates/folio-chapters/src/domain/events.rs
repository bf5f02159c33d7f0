//! Domain events recorded by the chapter sequencer.

use folio_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::sequencer::Phase;

/// Emitted when the sequencer moves onto a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEntered {
    /// Stage holding the step.
    pub stage_index: usize,
    /// The step entered.
    pub step_index: usize,
    /// `false` when the step was shown instantly by manual navigation.
    pub animated: bool,
}

/// Emitted when the sequencer moves onto a different stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEntered {
    /// Key of the stage entered.
    pub stage_key: String,
    /// Its position in the chapter.
    pub stage_index: usize,
}

/// Emitted when the last step of a stage has finished its pause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCompleted {
    /// Key of the completed stage.
    pub stage_key: String,
    /// Its position in the chapter.
    pub stage_index: usize,
}

/// Emitted when the fade window between two stages opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionStarted {
    /// Stage fading out.
    pub from_stage_key: String,
    /// Stage that will follow.
    pub to_stage_key: String,
}

/// Emitted when playback starts or resumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackStarted {
    /// Phase playback resumes in.
    pub phase: Phase,
}

/// Emitted when playback stops before the end of the chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackPaused {
    /// Phase playback stopped in.
    pub phase: Phase,
}

/// Emitted when autoplay completes the last stage of the chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterFinished {
    /// Key of the final stage.
    pub stage_key: String,
}

/// Emitted when the chapter restarts from its first step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restarted {
    /// The new restart generation.
    pub generation: u64,
}

/// Event payload variants for the chapter sequencer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequencerEventKind {
    /// A step was entered.
    StepEntered(StepEntered),
    /// A stage was entered.
    StageEntered(StageEntered),
    /// A stage ran out of steps.
    StageCompleted(StageCompleted),
    /// The fade between stages began.
    TransitionStarted(TransitionStarted),
    /// Playback started.
    PlaybackStarted(PlaybackStarted),
    /// Playback paused.
    PlaybackPaused(PlaybackPaused),
    /// The chapter reached its end.
    ChapterFinished(ChapterFinished),
    /// The chapter restarted.
    Restarted(Restarted),
}

impl SequencerEventKind {
    /// Routing name of this event kind.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::StepEntered(_) => "chapter.step_entered",
            Self::StageEntered(_) => "chapter.stage_entered",
            Self::StageCompleted(_) => "chapter.stage_completed",
            Self::TransitionStarted(_) => "chapter.transition_started",
            Self::PlaybackStarted(_) => "chapter.playback_started",
            Self::PlaybackPaused(_) => "chapter.playback_paused",
            Self::ChapterFinished(_) => "chapter.finished",
            Self::Restarted(_) => "chapter.restarted",
        }
    }
}

/// Domain event envelope for the chapter sequencer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SequencerEventKind,
}

impl DomainEvent for SequencerEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(&self.kind).unwrap_or(serde_json::Value::Null)
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
