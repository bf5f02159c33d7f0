//! Command handling for one chapter.
//!
//! The coordinator binds a chapter's sequencer to its neighbours in the
//! catalog and to the host's chapter switcher. Navigation that runs off either
//! end of the chapter becomes a switch request instead of a state change.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_content::domain::catalog::ChapterEntry;
use folio_core::clock::Clock;
use folio_core::error::DomainError;
use folio_core::navigation::{ChapterSwitch, ChapterSwitcher, SwitchDirection};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::commands::{
    AdvanceStep, AnswerQuestion, JumpToStage, Replay, ReplayQuestion, RetreatStep,
    TogglePlayPause,
};
use crate::domain::events::SequencerEvent;
use crate::domain::quiz::{AnswerRecord, QuizAnswers};
use crate::domain::sequencer::{ChapterSequencer, NavigationOutcome};

/// What a navigation command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled {
    /// The sequencer's answer to the request.
    pub outcome: NavigationOutcome,
    /// The switch requested from the host, if the request left the chapter.
    pub switch: Option<ChapterSwitch>,
    /// Events recorded while handling the command.
    pub events: Vec<SequencerEvent>,
}

/// Runs one chapter: its sequencer, quiz answers and neighbours.
pub struct ChapterCoordinator {
    title: String,
    previous: Option<String>,
    next: Option<String>,
    sequencer: ChapterSequencer,
    answers: QuizAnswers,
    switcher: Arc<dyn ChapterSwitcher>,
}

impl std::fmt::Debug for ChapterCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChapterCoordinator")
            .field("key", &self.key())
            .field("previous", &self.previous)
            .field("next", &self.next)
            .field("sequencer", &self.sequencer)
            .finish_non_exhaustive()
    }
}

impl ChapterCoordinator {
    /// Creates a coordinator for `entry` with the given neighbours.
    #[must_use]
    pub fn new(
        entry: &ChapterEntry,
        previous: Option<&str>,
        next: Option<&str>,
        switcher: Arc<dyn ChapterSwitcher>,
    ) -> Self {
        Self {
            title: entry.title.clone(),
            previous: previous.map(str::to_owned),
            next: next.map(str::to_owned),
            sequencer: ChapterSequencer::new(entry.key.clone(), entry.config.clone()),
            answers: QuizAnswers::new(entry.quizzes.clone()),
            switcher,
        }
    }

    /// The chapter key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.sequencer.chapter_key()
    }

    /// The chapter title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Read access to the sequencer.
    #[must_use]
    pub fn sequencer(&self) -> &ChapterSequencer {
        &self.sequencer
    }

    /// Read access to the quiz answers.
    #[must_use]
    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    /// Last stage, last step, not playing.
    #[must_use]
    pub fn is_at_final_state(&self) -> bool {
        self.sequencer.is_at_final_state()
    }

    /// Whether "next" does anything: false only at the very end of the last
    /// chapter.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.next.is_some() || !self.sequencer.is_at_end()
    }

    /// Whether "previous" does anything: false only at the very start of the
    /// first chapter.
    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.previous.is_some() || !self.sequencer.is_at_start()
    }

    /// When [`tick`](Self::tick) next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.sequencer.next_deadline()
    }

    /// Handles the `AdvanceStep` command. At the end of the chapter this asks
    /// the host to show the next chapter instead.
    #[instrument(skip_all, fields(chapter = %self.key(), correlation_id = %command.correlation_id))]
    pub fn handle_advance_step(&mut self, command: &AdvanceStep, clock: &dyn Clock) -> Handled {
        let outcome = self.sequencer.advance_step(command.correlation_id, clock);
        let switch = match outcome {
            NavigationOutcome::EndOfChapter => self.request_switch(SwitchDirection::Forward),
            _ => None,
        };
        info!(?outcome, "advance step handled");
        self.handled(outcome, switch)
    }

    /// Handles the `RetreatStep` command. At the start of the chapter this
    /// asks the host to show the previous chapter instead.
    #[instrument(skip_all, fields(chapter = %self.key(), correlation_id = %command.correlation_id))]
    pub fn handle_retreat_step(&mut self, command: &RetreatStep, clock: &dyn Clock) -> Handled {
        let outcome = self.sequencer.retreat_step(command.correlation_id, clock);
        let switch = match outcome {
            NavigationOutcome::StartOfChapter => self.request_switch(SwitchDirection::Backward),
            _ => None,
        };
        info!(?outcome, "retreat step handled");
        self.handled(outcome, switch)
    }

    /// Handles the `JumpToStage` command.
    #[instrument(skip_all, fields(chapter = %self.key(), correlation_id = %command.correlation_id, stage_key = %command.stage_key))]
    pub fn handle_jump_to_stage(&mut self, command: &JumpToStage, clock: &dyn Clock) -> Handled {
        let outcome = self
            .sequencer
            .jump_to_stage(&command.stage_key, command.correlation_id, clock);
        info!(?outcome, "jump to stage handled");
        self.handled(outcome, None)
    }

    /// Handles the `TogglePlayPause` command. At the chapter's final state
    /// the play control replays the chapter.
    #[instrument(skip_all, fields(chapter = %self.key(), correlation_id = %command.correlation_id))]
    pub fn handle_toggle_play_pause(
        &mut self,
        command: &TogglePlayPause,
        clock: &dyn Clock,
    ) -> Vec<SequencerEvent> {
        if self.is_at_final_state() {
            info!("play at final state replays the chapter");
            self.restart(command.correlation_id, clock);
        } else {
            self.sequencer
                .toggle_play_pause(command.correlation_id, clock);
            info!(is_playing = self.sequencer.is_playing(), "play/pause toggled");
        }
        self.sequencer.drain_events()
    }

    /// Handles the `Replay` command: restart in autoplay and forget quiz
    /// answers.
    #[instrument(skip_all, fields(chapter = %self.key(), correlation_id = %command.correlation_id))]
    pub fn handle_replay(&mut self, command: &Replay, clock: &dyn Clock) -> Vec<SequencerEvent> {
        self.restart(command.correlation_id, clock);
        info!("chapter replayed");
        self.sequencer.drain_events()
    }

    /// Handles the `AnswerQuestion` command.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownQuiz` or `DomainError::UnknownOption` if
    /// the answer does not match a quiz of this chapter, and
    /// `DomainError::QuizNotOnScreen` unless the quiz's question stage is the
    /// active stage.
    #[instrument(skip_all, fields(chapter = %self.key(), correlation_id = %command.correlation_id, quiz_id = %command.quiz_id))]
    pub fn handle_answer_question(
        &mut self,
        command: &AnswerQuestion,
        _clock: &dyn Clock,
    ) -> Result<AnswerRecord, DomainError> {
        if self.answers.stage_key(&command.quiz_id)? != self.sequencer.stage_key() {
            debug!(stage_key = %self.sequencer.stage_key(), "answer for a question off screen");
            return Err(DomainError::QuizNotOnScreen(command.quiz_id.clone()));
        }
        let record = self.answers.answer(&command.quiz_id, command.option_index)?;
        info!(correct = record.correct, "question answered");
        Ok(record)
    }

    /// Handles the `ReplayQuestion` command. Returns whether an answer was
    /// forgotten.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownQuiz` if the chapter has no such quiz.
    #[instrument(skip_all, fields(chapter = %self.key(), correlation_id = %command.correlation_id, quiz_id = %command.quiz_id))]
    pub fn handle_replay_question(
        &mut self,
        command: &ReplayQuestion,
        _clock: &dyn Clock,
    ) -> Result<bool, DomainError> {
        let forgotten = self.answers.replay_question(&command.quiz_id)?;
        debug!(forgotten, "question reset");
        Ok(forgotten)
    }

    /// The chapter scrolled into view.
    pub fn activate(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Vec<SequencerEvent> {
        self.sequencer.on_chapter_became_active(correlation_id, clock);
        debug!(chapter = %self.key(), is_playing = self.sequencer.is_playing(), "chapter activated");
        self.sequencer.drain_events()
    }

    /// The chapter left the view.
    pub fn deactivate(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Vec<SequencerEvent> {
        self.sequencer
            .on_chapter_became_inactive(correlation_id, clock);
        debug!(chapter = %self.key(), "chapter deactivated");
        self.sequencer.drain_events()
    }

    /// Fires due timers and returns the events they recorded.
    pub fn tick(&mut self, clock: &dyn Clock) -> Vec<SequencerEvent> {
        let fired = self.sequencer.tick(clock);
        if fired > 0 {
            debug!(chapter = %self.key(), fired, "timers fired");
        }
        self.sequencer.drain_events()
    }

    fn restart(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.sequencer.replay(correlation_id, clock);
        self.answers.reset();
    }

    fn request_switch(&self, direction: SwitchDirection) -> Option<ChapterSwitch> {
        let target = match direction {
            SwitchDirection::Forward => self.next.as_deref(),
            SwitchDirection::Backward => self.previous.as_deref(),
        };
        let Some(to) = target else {
            debug!(?direction, "no neighbouring chapter to switch to");
            return None;
        };
        let request = ChapterSwitch {
            from: self.key().to_owned(),
            to: to.to_owned(),
            direction,
        };
        info!(to, ?direction, "requesting chapter switch");
        self.switcher.switch_to(request.clone());
        Some(request)
    }

    fn handled(&mut self, outcome: NavigationOutcome, switch: Option<ChapterSwitch>) -> Handled {
        Handled {
            outcome,
            switch,
            events: self.sequencer.drain_events(),
        }
    }
}
