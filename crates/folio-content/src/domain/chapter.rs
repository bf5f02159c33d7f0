//! Steps, stages and chapter configurations.

use std::collections::HashSet;

use folio_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Milliseconds between typed characters.
pub const DEFAULT_TYPE_SPEED_MS: u64 = 25;
/// Milliseconds between backspaced characters.
pub const DEFAULT_BACKSPACE_SPEED_MS: u64 = 20;
/// Pause after a step's body is fully typed.
pub const DEFAULT_STEP_PAUSE_MS: u64 = 2700;
/// Pause after a stage completes before autoplay moves on.
pub const DEFAULT_STAGE_PAUSE_MS: u64 = 2700;
/// Length of the fade window between stages.
pub const DEFAULT_TRANSITION_MS: u64 = 1500;

/// One title and body pairing, the unit of typewriter animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Heading text.
    #[serde(default)]
    pub title: String,
    /// Main text.
    #[serde(default)]
    pub body: String,
    /// Overrides the chapter's inter-step pause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_ms: Option<u64>,
}

impl Step {
    /// Creates a step that uses the chapter's default pause.
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            pause_ms: None,
        }
    }

    /// Sets the pause that follows this step.
    #[must_use]
    pub fn with_pause(mut self, pause_ms: u64) -> Self {
        self.pause_ms = Some(pause_ms);
        self
    }
}

/// A labelled group of steps; one tab in the stepper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Identifier used for stage selection.
    pub key: String,
    /// Text shown in the nav bar. Falls back to the key when empty.
    #[serde(default)]
    pub nav_label: String,
    /// Ordered steps; never empty in a validated chapter.
    pub steps: Vec<Step>,
    /// Pause before autoplay moves to the next stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_advance_pause_ms: Option<u64>,
}

impl Stage {
    /// Creates a stage whose nav label is its key.
    #[must_use]
    pub fn new(key: impl Into<String>, steps: Vec<Step>) -> Self {
        let key = key.into();
        Self {
            nav_label: key.clone(),
            key,
            steps,
            auto_advance_pause_ms: None,
        }
    }

    /// Sets the nav label.
    #[must_use]
    pub fn with_label(mut self, nav_label: impl Into<String>) -> Self {
        self.nav_label = nav_label.into();
        self
    }

    /// Sets the pause before autoplay moves to the next stage.
    #[must_use]
    pub fn with_auto_advance_pause(mut self, pause_ms: u64) -> Self {
        self.auto_advance_pause_ms = Some(pause_ms);
        self
    }

    /// The label to render for this stage.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.nav_label.is_empty() {
            &self.key
        } else {
            &self.nav_label
        }
    }
}

/// Per-chapter animation timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Milliseconds per typed character.
    pub type_speed_ms: u64,
    /// Milliseconds per backspaced character.
    pub backspace_speed_ms: u64,
    /// Pause after a step when the step sets none.
    pub step_pause_ms: u64,
    /// Pause after a stage when the stage sets none.
    pub stage_pause_ms: u64,
    /// Fade window between stages.
    pub transition_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            type_speed_ms: DEFAULT_TYPE_SPEED_MS,
            backspace_speed_ms: DEFAULT_BACKSPACE_SPEED_MS,
            step_pause_ms: DEFAULT_STEP_PAUSE_MS,
            stage_pause_ms: DEFAULT_STAGE_PAUSE_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
        }
    }
}

/// A validated, immutable chapter: at least one stage, every stage with at
/// least one step, stage keys unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterConfig {
    stages: Vec<Stage>,
    timings: Timings,
}

impl ChapterConfig {
    /// Validates and builds a chapter configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyChapter` if `stages` is empty,
    /// `DomainError::EmptyStage` if a stage has no steps and
    /// `DomainError::DuplicateStage` if two stages share a key.
    pub fn new(stages: Vec<Stage>, timings: Timings) -> Result<Self, DomainError> {
        if stages.is_empty() {
            return Err(DomainError::EmptyChapter);
        }
        let mut seen = HashSet::new();
        for stage in &stages {
            if stage.steps.is_empty() {
                return Err(DomainError::EmptyStage(stage.key.clone()));
            }
            if !seen.insert(stage.key.as_str()) {
                return Err(DomainError::DuplicateStage(stage.key.clone()));
            }
        }
        Ok(Self { stages, timings })
    }

    /// All stages in order.
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// The stage at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn stage(&self, index: usize) -> &Stage {
        &self.stages[index]
    }

    /// The step at `(stage, step)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn step(&self, stage: usize, step: usize) -> &Step {
        &self.stages[stage].steps[step]
    }

    /// Number of stages; always at least one.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Number of steps in the stage at `index`.
    #[must_use]
    pub fn step_count(&self, stage: usize) -> usize {
        self.stages[stage].steps.len()
    }

    /// Position of the stage with `key`, if any.
    #[must_use]
    pub fn stage_index(&self, key: &str) -> Option<usize> {
        self.stages.iter().position(|s| s.key == key)
    }

    /// Index of the final stage.
    #[must_use]
    pub fn last_stage_index(&self) -> usize {
        self.stages.len() - 1
    }

    /// Whether `stage` is the final stage.
    #[must_use]
    pub fn is_last_stage(&self, stage: usize) -> bool {
        stage == self.last_stage_index()
    }

    /// Whether `step` is the final step of `stage`.
    #[must_use]
    pub fn is_last_step(&self, stage: usize, step: usize) -> bool {
        step + 1 == self.step_count(stage)
    }

    /// Animation timings.
    #[must_use]
    pub fn timings(&self) -> Timings {
        self.timings
    }

    /// Pause after the step at `(stage, step)` finishes typing.
    #[must_use]
    pub fn step_pause_ms(&self, stage: usize, step: usize) -> u64 {
        self.step(stage, step)
            .pause_ms
            .unwrap_or(self.timings.step_pause_ms)
    }

    /// Pause after the stage at `index` completes.
    #[must_use]
    pub fn stage_pause_ms(&self, stage: usize) -> u64 {
        self.stages[stage]
            .auto_advance_pause_ms
            .unwrap_or(self.timings.stage_pause_ms)
    }
}
