//! Player state: the deck of chapters and the input dispatcher.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use folio_chapters::application::deck::ChapterDeck;
use folio_chapters::application::view::ChapterView;
use folio_chapters::domain::commands::{
    AdvanceStep, AnswerQuestion, JumpToStage, Replay, ReplayQuestion, RetreatStep,
    TogglePlayPause,
};
use folio_chapters::domain::events::SequencerEvent;
use folio_content::domain::catalog::Catalog;
use folio_core::clock::Clock;
use folio_core::event::DomainEvent;
use folio_core::navigation::{ChapterSwitch, ChapterSwitcher};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::input::Input;

/// Forwards switch requests to the player loop, which applies them on its
/// next turn the way a browser scrolls a chapter into view.
#[derive(Debug, Clone)]
pub struct ChannelSwitcher {
    sender: UnboundedSender<ChapterSwitch>,
}

impl ChannelSwitcher {
    #[must_use]
    pub fn new(sender: UnboundedSender<ChapterSwitch>) -> Self {
        Self { sender }
    }
}

impl ChapterSwitcher for ChannelSwitcher {
    fn switch_to(&self, request: ChapterSwitch) {
        if self.sender.send(request).is_err() {
            warn!("player loop has stopped; dropping chapter switch");
        }
    }
}

/// What the loop should do after an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The user asked to see the view regardless of changes.
    Render,
    Quit,
}

/// Shared state of one player run.
pub struct PlayerState {
    deck: ChapterDeck,
    clock: Arc<dyn Clock>,
    /// Content hash, logged with every run.
    pub version_hash: String,
}

impl PlayerState {
    /// Builds the deck for `catalog`. Nothing is visible until
    /// [`start`](Self::start).
    #[must_use]
    pub fn new(
        catalog: &Catalog,
        version_hash: String,
        clock: Arc<dyn Clock>,
        switcher: &Arc<dyn ChapterSwitcher>,
    ) -> Self {
        Self {
            deck: ChapterDeck::new(catalog, switcher),
            clock,
            version_hash,
        }
    }

    /// Shows `chapter`, or the first chapter when `None` or unknown.
    pub fn start(&mut self, chapter: Option<&str>) {
        let correlation_id = Uuid::new_v4();
        let events = match chapter {
            Some(key) if self.deck.get(key).is_some() => {
                self.deck.show(key, correlation_id, self.clock.as_ref())
            }
            Some(key) => {
                warn!(chapter = key, "unknown start chapter; starting at the top");
                self.deck.start(correlation_id, self.clock.as_ref())
            }
            None => self.deck.start(correlation_id, self.clock.as_ref()),
        };
        log_events(&events);
    }

    /// The view of the visible chapter.
    #[must_use]
    pub fn view(&self) -> Option<ChapterView> {
        self.deck.visible().map(ChapterView::of)
    }

    /// When the loop must next call [`tick`](Self::tick).
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.deck.next_deadline()
    }

    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Fires due timers.
    pub fn tick(&mut self) {
        let events = self.deck.tick(self.clock.as_ref());
        log_events(&events);
    }

    /// Applies a chapter switch request.
    pub fn apply_switch(&mut self, request: &ChapterSwitch) {
        let events = self
            .deck
            .show(&request.to, Uuid::new_v4(), self.clock.as_ref());
        log_events(&events);
    }

    /// Runs one input command against the visible chapter.
    pub fn dispatch(&mut self, input: Input) -> Flow {
        let correlation_id = Uuid::new_v4();
        let clock = self.clock.as_ref();

        if let Input::Show(key) = &input {
            log_events(&self.deck.show(key, correlation_id, clock));
            return Flow::Continue;
        }
        let Some(chapter) = self.deck.visible_mut() else {
            return Flow::Continue;
        };

        let events = match input {
            Input::Next => chapter.handle_advance_step(&AdvanceStep { correlation_id }, clock).events,
            Input::Prev => chapter.handle_retreat_step(&RetreatStep { correlation_id }, clock).events,
            Input::Toggle => chapter.handle_toggle_play_pause(&TogglePlayPause { correlation_id }, clock),
            Input::Replay => chapter.handle_replay(&Replay { correlation_id }, clock),
            Input::Jump(stage_key) => {
                chapter
                    .handle_jump_to_stage(&JumpToStage { correlation_id, stage_key }, clock)
                    .events
            }
            Input::Answer { quiz_id, option_index } => {
                let command = AnswerQuestion {
                    correlation_id,
                    quiz_id,
                    option_index,
                };
                if let Err(e) = chapter.handle_answer_question(&command, clock) {
                    warn!(error = %e, "answer rejected");
                }
                Vec::new()
            }
            Input::Retry(quiz_id) => {
                let command = ReplayQuestion {
                    correlation_id,
                    quiz_id,
                };
                if let Err(e) = chapter.handle_replay_question(&command, clock) {
                    warn!(error = %e, "retry rejected");
                }
                Vec::new()
            }
            Input::View => return Flow::Render,
            Input::Quit => return Flow::Quit,
            Input::Show(_) => Vec::new(),
        };
        log_events(&events);
        Flow::Continue
    }
}

fn log_events(events: &[SequencerEvent]) {
    for event in events {
        let meta = event.metadata();
        debug!(
            event_type = event.event_type(),
            chapter = %meta.chapter_key,
            sequence_number = meta.sequence_number,
            correlation_id = %meta.correlation_id,
            payload = %event.to_payload(),
            "sequencer event"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_chapters::domain::sequencer::NavigationMode;
    use folio_test_support::{ManualClock, catalog, chapter, config, stage, step};
    use tokio::sync::mpsc;

    fn player() -> (PlayerState, mpsc::UnboundedReceiver<ChapterSwitch>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let switcher: Arc<dyn ChapterSwitcher> = Arc::new(ChannelSwitcher::new(sender));
        let catalog = catalog(vec![
            chapter("landing", config(vec![stage("Home", vec![step("Viljar", "get to know")])])),
            chapter(
                "design",
                config(vec![
                    stage("ABOUT_DESIGN_KEY", vec![step("About design", "x")]),
                    stage("WHAT_KEY", vec![step("What I do", "y")]),
                ]),
            ),
        ]);
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::at_t0());
        let mut state = PlayerState::new(&catalog, "hash".to_owned(), clock, &switcher);
        state.start(None);
        (state, receiver)
    }

    #[test]
    fn test_start_at_named_chapter() {
        let (mut state, _rx) = player();

        state.start(Some("design"));

        assert_eq!(state.view().unwrap().chapter_key, "design");
    }

    #[test]
    fn test_next_at_end_sends_switch_over_channel() {
        // Arrange
        let (mut state, mut rx) = player();

        // Act
        let flow = state.dispatch(Input::Next);

        // Assert
        assert_eq!(flow, Flow::Continue);
        let request = rx.try_recv().unwrap();
        assert_eq!(request.to, "design");
        state.apply_switch(&request);
        let view = state.view().unwrap();
        assert_eq!(view.chapter_key, "design");
        assert!(view.is_playing);
    }

    #[test]
    fn test_jump_and_view_and_quit() {
        let (mut state, _rx) = player();
        state.dispatch(Input::Show("design".to_owned()));

        assert_eq!(state.dispatch(Input::Jump("WHAT_KEY".to_owned())), Flow::Continue);
        assert_eq!(state.dispatch(Input::View), Flow::Render);
        assert_eq!(state.dispatch(Input::Quit), Flow::Quit);

        let view = state.view().unwrap();
        assert_eq!(view.stage_key, "WHAT_KEY");
        assert_eq!(view.navigation_mode, NavigationMode::Manual);
    }

    #[test]
    fn test_rejected_answer_keeps_running() {
        let (mut state, _rx) = player();

        let flow = state.dispatch(Input::Answer {
            quiz_id: "designSystem".to_owned(),
            option_index: 0,
        });

        assert_eq!(flow, Flow::Continue);
        assert!(state.view().unwrap().answers.is_empty());
    }
}
