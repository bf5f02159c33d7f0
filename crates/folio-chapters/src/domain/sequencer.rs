//! The chapter sequencer state machine.
//!
//! A sequencer owns the playback state of one chapter: the current stage and
//! step, the revealed title and body, the animation phase and the single
//! pending timer that moves the animation forward. The host calls
//! [`ChapterSequencer::tick`] once [`ChapterSequencer::next_deadline`] has
//! passed; manual operations cancel the pending timer before they touch any
//! state, so a stale timer can never fire into a newer position.

use chrono::{DateTime, Utc};
use folio_content::domain::chapter::{ChapterConfig, Step};
use folio_core::clock::Clock;
use folio_core::event::EventMetadata;
use folio_core::timer::TimerSlot;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::events::{
    ChapterFinished, PlaybackPaused, PlaybackStarted, Restarted, SequencerEvent,
    SequencerEventKind, StageCompleted, StageEntered, StepEntered, TransitionStarted,
};
use super::typewriter::Typewriter;

/// Animation sub-phase of the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Typing the step title.
    TypingTitle,
    /// Typing the step body.
    TypingBody,
    /// Holding the fully typed step.
    Pausing,
    /// Erasing the previous step's title before typing the new one.
    BackspacingTitle,
    /// Every step of the stage has been shown.
    StageComplete,
}

/// Whether the user has taken over navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// Autoplay moves between stages and chapter re-entry restarts playback.
    Automatic,
    /// Set by any manual navigation; cleared only by replay.
    Manual,
}

/// Result of a manual navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The position changed.
    Moved,
    /// Already at the last step of the last stage; nothing changed.
    EndOfChapter,
    /// Already at the first step of the first stage; nothing changed.
    StartOfChapter,
    /// The request did not apply; nothing changed.
    Ignored,
}

/// The two halves of an autoplay stage change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTimer {
    /// Waiting out the stage pause before the fade starts.
    BeforeFade,
    /// Inside the fade window; the next stage follows.
    DuringFade,
}

/// What the pending timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Type or erase one character.
    Reveal,
    /// End the pause after a step.
    StepPause,
    /// Move towards the next stage.
    Stage(StageTimer),
}

/// Playback state of one chapter.
#[derive(Debug)]
pub struct ChapterSequencer {
    chapter_key: String,
    config: ChapterConfig,
    stage_index: usize,
    step_index: usize,
    title: Typewriter,
    body: Typewriter,
    phase: Phase,
    is_playing: bool,
    navigation_mode: NavigationMode,
    is_transitioning: bool,
    generation: u64,
    timer: TimerSlot<TimerKind>,
    /// Correlation of the command that started the current playback.
    playback_correlation: Uuid,
    version: i64,
    uncommitted_events: Vec<SequencerEvent>,
}

impl ChapterSequencer {
    /// Creates a paused sequencer at the first step with nothing revealed.
    #[must_use]
    pub fn new(chapter_key: impl Into<String>, config: ChapterConfig) -> Self {
        let first = config.step(0, 0);
        let title = Typewriter::empty(first.title.clone());
        let body = Typewriter::empty(first.body.clone());
        Self {
            chapter_key: chapter_key.into(),
            config,
            stage_index: 0,
            step_index: 0,
            title,
            body,
            phase: Phase::TypingTitle,
            is_playing: false,
            navigation_mode: NavigationMode::Automatic,
            is_transitioning: false,
            generation: 0,
            timer: TimerSlot::new(),
            playback_correlation: Uuid::nil(),
            version: 0,
            uncommitted_events: Vec::new(),
        }
    }

    // --- Queries ---

    /// Key of the chapter this sequencer plays.
    #[must_use]
    pub fn chapter_key(&self) -> &str {
        &self.chapter_key
    }

    /// The chapter being played.
    #[must_use]
    pub fn config(&self) -> &ChapterConfig {
        &self.config
    }

    /// Index of the active stage.
    #[must_use]
    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    /// Key of the active stage.
    #[must_use]
    pub fn stage_key(&self) -> &str {
        &self.config.stage(self.stage_index).key
    }

    /// Index of the active step within its stage.
    #[must_use]
    pub fn step_index(&self) -> usize {
        self.step_index
    }

    /// The active step.
    #[must_use]
    pub fn step(&self) -> &Step {
        self.config.step(self.stage_index, self.step_index)
    }

    /// Title text currently shown.
    #[must_use]
    pub fn revealed_title(&self) -> &str {
        self.title.revealed()
    }

    /// Body text currently shown.
    #[must_use]
    pub fn revealed_body(&self) -> &str {
        self.body.revealed()
    }

    /// Typewriter for the title. While backspacing it still targets the
    /// previous step's title.
    #[must_use]
    pub fn title_typewriter(&self) -> &Typewriter {
        &self.title
    }

    /// Typewriter for the body.
    #[must_use]
    pub fn body_typewriter(&self) -> &Typewriter {
        &self.body
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub fn navigation_mode(&self) -> NavigationMode {
        self.navigation_mode
    }

    /// True only inside the fade window between two stages.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    /// Restart counter; bumped whenever the chapter or a stage restarts.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When [`tick`](Self::tick) next has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timer.deadline()
    }

    /// What the pending timer will do, if one is armed.
    #[must_use]
    pub fn pending_timer(&self) -> Option<TimerKind> {
        self.timer.kind()
    }

    /// Whether the position is the first step of the first stage.
    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.stage_index == 0 && self.step_index == 0
    }

    /// Whether the position is the last step of the last stage.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.config.is_last_stage(self.stage_index)
            && self.config.is_last_step(self.stage_index, self.step_index)
    }

    /// At the end of the chapter with playback stopped.
    #[must_use]
    pub fn is_at_final_state(&self) -> bool {
        self.is_at_end() && !self.is_playing
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[SequencerEvent] {
        &self.uncommitted_events
    }

    /// Removes and returns the recorded events.
    pub fn drain_events(&mut self) -> Vec<SequencerEvent> {
        let events = std::mem::take(&mut self.uncommitted_events);
        self.version += i64::try_from(events.len()).unwrap_or(i64::MAX);
        events
    }

    // --- Manual navigation ---

    /// Shows the next step instantly and stops autoplay.
    ///
    /// At the last step of the last stage nothing changes and
    /// [`NavigationOutcome::EndOfChapter`] is returned.
    pub fn advance_step(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> NavigationOutcome {
        if self.is_at_end() {
            return NavigationOutcome::EndOfChapter;
        }
        let (stage, step) = if self.config.is_last_step(self.stage_index, self.step_index) {
            (self.stage_index + 1, 0)
        } else {
            (self.stage_index, self.step_index + 1)
        };
        self.show_instantly(stage, step, correlation_id, clock.now());
        NavigationOutcome::Moved
    }

    /// Shows the previous step instantly and stops autoplay.
    ///
    /// At the first step of the first stage nothing changes and
    /// [`NavigationOutcome::StartOfChapter`] is returned.
    pub fn retreat_step(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> NavigationOutcome {
        if self.is_at_start() {
            return NavigationOutcome::StartOfChapter;
        }
        let (stage, step) = if self.step_index == 0 {
            let previous = self.stage_index - 1;
            (previous, self.config.step_count(previous) - 1)
        } else {
            (self.stage_index, self.step_index - 1)
        };
        self.show_instantly(stage, step, correlation_id, clock.now());
        NavigationOutcome::Moved
    }

    /// Types the stage with `key` from its first step. Selecting the active
    /// stage restarts it. Unknown keys are ignored.
    pub fn jump_to_stage(
        &mut self,
        key: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> NavigationOutcome {
        let Some(stage) = self.config.stage_index(key) else {
            debug!(chapter = %self.chapter_key, stage_key = key, "ignoring jump to unknown stage");
            return NavigationOutcome::Ignored;
        };
        let now = clock.now();
        self.timer.cancel();
        self.navigation_mode = NavigationMode::Manual;
        self.generation += 1;
        self.enter_animated(stage, correlation_id, now);
        self.start_playing(correlation_id, now);
        self.schedule(now);
        NavigationOutcome::Moved
    }

    /// Pauses, or resumes in the phase the revealed text calls for.
    pub fn toggle_play_pause(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        let now = clock.now();
        if self.is_playing {
            self.stop_playing(correlation_id, now);
            return;
        }
        self.phase = self.resume_phase();
        self.start_playing(correlation_id, now);
        self.schedule(now);
    }

    /// Restarts the chapter from its first step in autoplay.
    pub fn replay(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        let now = clock.now();
        self.timer.cancel();
        self.navigation_mode = NavigationMode::Automatic;
        self.restart(correlation_id, now);
    }

    // --- Visibility ---

    /// The chapter scrolled into view.
    ///
    /// In manual mode the position is left alone and nothing plays. In
    /// automatic mode a chapter parked at its end stays parked; otherwise it
    /// restarts from its first step.
    pub fn on_chapter_became_active(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        if self.navigation_mode == NavigationMode::Manual || self.is_parked_at_end() {
            return;
        }
        let now = clock.now();
        self.timer.cancel();
        self.restart(correlation_id, now);
    }

    /// The chapter left the view: stop playing and drop the pending timer.
    pub fn on_chapter_became_inactive(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.stop_playing(correlation_id, clock.now());
    }

    // --- Timers ---

    /// Fires every timer due at `clock.now()` in deadline order. Each chained
    /// timer is armed from the deadline that fired, so a late tick catches up
    /// exactly. Returns how many timers fired.
    pub fn tick(&mut self, clock: &dyn Clock) -> usize {
        let now = clock.now();
        let mut fired = 0;
        while let Some((due, kind)) = self.timer.take_due(now) {
            fired += 1;
            self.fire(kind, due);
        }
        fired
    }

    fn fire(&mut self, kind: TimerKind, due: DateTime<Utc>) {
        match kind {
            TimerKind::Reveal => {
                match self.phase {
                    Phase::TypingTitle => {
                        self.title.type_next();
                    }
                    Phase::TypingBody => {
                        self.body.type_next();
                    }
                    Phase::BackspacingTitle => {
                        self.title.backspace();
                    }
                    Phase::Pausing | Phase::StageComplete => {}
                }
                self.schedule(due);
            }
            TimerKind::StepPause => {
                self.finish_step(due);
                self.schedule(due);
            }
            TimerKind::Stage(StageTimer::BeforeFade) => {
                let next = self.stage_index + 1;
                self.is_transitioning = true;
                self.record(
                    SequencerEventKind::TransitionStarted(TransitionStarted {
                        from_stage_key: self.stage_key().to_owned(),
                        to_stage_key: self.config.stage(next).key.clone(),
                    }),
                    self.playback_correlation,
                    due,
                );
                let fade = self.config.timings().transition_ms;
                self.timer
                    .arm(due, fade, TimerKind::Stage(StageTimer::DuringFade));
            }
            TimerKind::Stage(StageTimer::DuringFade) => {
                self.is_transitioning = false;
                self.enter_animated(self.stage_index + 1, self.playback_correlation, due);
                self.schedule(due);
            }
        }
    }

    /// The step-advance decision taken when a step's pause runs out.
    fn finish_step(&mut self, at: DateTime<Utc>) {
        let (stage, step) = (self.stage_index, self.step_index);
        let correlation = self.playback_correlation;

        if self.config.is_last_step(stage, step) {
            self.phase = Phase::StageComplete;
            self.record(
                SequencerEventKind::StageCompleted(StageCompleted {
                    stage_key: self.stage_key().to_owned(),
                    stage_index: stage,
                }),
                correlation,
                at,
            );
            if self.config.is_last_stage(stage) {
                self.is_playing = false;
                self.record(
                    SequencerEventKind::ChapterFinished(ChapterFinished {
                        stage_key: self.stage_key().to_owned(),
                    }),
                    correlation,
                    at,
                );
            }
            return;
        }

        let current = self.config.step(stage, step);
        let next = self.config.step(stage, step + 1);
        let (same_body, same_title) = (next.body == current.body, next.title == current.title);
        let (next_title, next_body) = (next.title.clone(), next.body.clone());
        self.step_index = step + 1;

        if same_body {
            self.phase = Phase::BackspacingTitle;
        } else if same_title {
            self.body = Typewriter::empty(next_body);
            self.phase = Phase::TypingBody;
        } else {
            self.title = Typewriter::empty(next_title);
            self.body = Typewriter::empty(next_body);
            self.phase = Phase::TypingTitle;
        }
        self.record(
            SequencerEventKind::StepEntered(StepEntered {
                stage_index: stage,
                step_index: self.step_index,
                animated: true,
            }),
            correlation,
            at,
        );
    }

    /// Runs the instant phase changes and arms the timer the resulting phase
    /// waits on. A paused sequencer has no pending timer.
    fn schedule(&mut self, from: DateTime<Utc>) {
        if !self.is_playing {
            self.timer.cancel();
            return;
        }
        let timings = self.config.timings();
        loop {
            match self.phase {
                Phase::TypingTitle if self.title.is_complete() => self.phase = Phase::TypingBody,
                Phase::TypingBody if self.body.is_complete() => self.phase = Phase::Pausing,
                Phase::TypingTitle | Phase::TypingBody => {
                    self.timer.arm(from, timings.type_speed_ms, TimerKind::Reveal);
                    return;
                }
                Phase::BackspacingTitle if self.title.is_empty() => {
                    self.title = Typewriter::empty(self.step().title.clone());
                    self.phase = Phase::TypingTitle;
                }
                Phase::BackspacingTitle => {
                    self.timer
                        .arm(from, timings.backspace_speed_ms, TimerKind::Reveal);
                    return;
                }
                Phase::Pausing => {
                    let pause = self.config.step_pause_ms(self.stage_index, self.step_index);
                    self.timer.arm(from, pause, TimerKind::StepPause);
                    return;
                }
                Phase::StageComplete => {
                    if self.navigation_mode == NavigationMode::Automatic
                        && !self.config.is_last_stage(self.stage_index)
                    {
                        let pause = self.config.stage_pause_ms(self.stage_index);
                        self.timer
                            .arm(from, pause, TimerKind::Stage(StageTimer::BeforeFade));
                    } else {
                        self.timer.cancel();
                    }
                    return;
                }
            }
        }
    }

    // --- State helpers ---

    fn resume_phase(&self) -> Phase {
        if self.phase == Phase::StageComplete {
            return Phase::StageComplete;
        }
        if self.title.target() != self.step().title {
            Phase::BackspacingTitle
        } else if !self.title.is_complete() {
            Phase::TypingTitle
        } else if !self.body.is_complete() {
            Phase::TypingBody
        } else {
            Phase::Pausing
        }
    }

    fn is_parked_at_end(&self) -> bool {
        self.phase == Phase::StageComplete
            && self.config.is_last_stage(self.stage_index)
            && !self.is_playing
    }

    fn show_instantly(&mut self, stage: usize, step: usize, correlation_id: Uuid, now: DateTime<Utc>) {
        self.stop_playing(correlation_id, now);
        self.navigation_mode = NavigationMode::Manual;
        let entered_stage = stage != self.stage_index;
        self.stage_index = stage;
        self.step_index = step;
        let shown = self.config.step(stage, step);
        self.title = Typewriter::filled(shown.title.clone());
        self.body = Typewriter::filled(shown.body.clone());
        self.phase = Phase::Pausing;
        if entered_stage {
            self.record_stage_entered(correlation_id, now);
        }
        self.record(
            SequencerEventKind::StepEntered(StepEntered {
                stage_index: stage,
                step_index: step,
                animated: false,
            }),
            correlation_id,
            now,
        );
    }

    fn enter_animated(&mut self, stage: usize, correlation_id: Uuid, at: DateTime<Utc>) {
        self.stage_index = stage;
        self.step_index = 0;
        let first = self.config.step(stage, 0);
        self.title = Typewriter::empty(first.title.clone());
        self.body = Typewriter::empty(first.body.clone());
        self.phase = Phase::TypingTitle;
        self.is_transitioning = false;
        self.record_stage_entered(correlation_id, at);
        self.record(
            SequencerEventKind::StepEntered(StepEntered {
                stage_index: stage,
                step_index: 0,
                animated: true,
            }),
            correlation_id,
            at,
        );
    }

    fn restart(&mut self, correlation_id: Uuid, now: DateTime<Utc>) {
        self.generation += 1;
        self.record(
            SequencerEventKind::Restarted(Restarted {
                generation: self.generation,
            }),
            correlation_id,
            now,
        );
        self.enter_animated(0, correlation_id, now);
        self.start_playing(correlation_id, now);
        self.schedule(now);
    }

    fn start_playing(&mut self, correlation_id: Uuid, now: DateTime<Utc>) {
        self.playback_correlation = correlation_id;
        if !self.is_playing {
            self.is_playing = true;
            self.record(
                SequencerEventKind::PlaybackStarted(PlaybackStarted { phase: self.phase }),
                correlation_id,
                now,
            );
        }
    }

    fn stop_playing(&mut self, correlation_id: Uuid, now: DateTime<Utc>) {
        self.timer.cancel();
        self.is_transitioning = false;
        if self.is_playing {
            self.is_playing = false;
            self.record(
                SequencerEventKind::PlaybackPaused(PlaybackPaused { phase: self.phase }),
                correlation_id,
                now,
            );
        }
    }

    fn record_stage_entered(&mut self, correlation_id: Uuid, at: DateTime<Utc>) {
        self.record(
            SequencerEventKind::StageEntered(StageEntered {
                stage_key: self.stage_key().to_owned(),
                stage_index: self.stage_index,
            }),
            correlation_id,
            at,
        );
    }

    #[allow(clippy::cast_possible_wrap)]
    fn record(&mut self, kind: SequencerEventKind, correlation_id: Uuid, at: DateTime<Utc>) {
        let sequence_number = self.version + self.uncommitted_events.len() as i64 + 1;
        let metadata = EventMetadata::new(
            kind.event_type(),
            &self.chapter_key,
            sequence_number,
            correlation_id,
            at,
        );
        self.uncommitted_events.push(SequencerEvent { metadata, kind });
    }
}
