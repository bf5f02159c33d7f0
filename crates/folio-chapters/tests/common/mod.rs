//! Shared test helpers for chapter engine integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use folio_chapters::application::coordinator::{ChapterCoordinator, Handled};
use folio_chapters::application::deck::ChapterDeck;
use folio_chapters::application::view::ChapterView;
use folio_chapters::domain::commands::{AdvanceStep, JumpToStage, RetreatStep, TogglePlayPause};
use folio_chapters::domain::events::SequencerEvent;
use folio_content::application::builtin;
use folio_content::domain::catalog::Catalog;
use folio_core::clock::Clock;
use folio_core::navigation::ChapterSwitcher;
use folio_test_support::{ManualClock, RecordingChapterSwitcher};
use uuid::Uuid;

/// Upper bound on timers fired by [`Harness::run_until_idle`].
const MAX_TIMERS: usize = 1_000_000;

/// A deck wired to a recording switcher and a manual clock.
pub struct Harness {
    pub deck: ChapterDeck,
    pub switcher: Arc<RecordingChapterSwitcher>,
    pub clock: ManualClock,
    /// Switch requests already followed.
    followed: usize,
}

impl Harness {
    /// A started deck over the built-in portfolio.
    pub fn portfolio() -> Self {
        let ingested = builtin::portfolio().unwrap();
        Self::started(&ingested.catalog)
    }

    /// A deck over `catalog` with its first chapter in view.
    pub fn started(catalog: &Catalog) -> Self {
        let switcher = Arc::new(RecordingChapterSwitcher::new());
        let sink: Arc<dyn ChapterSwitcher> = switcher.clone();
        let clock = ManualClock::at_t0();
        let mut deck = ChapterDeck::new(catalog, &sink);
        deck.start(Uuid::new_v4(), &clock);
        Self {
            deck,
            switcher,
            clock,
            followed: 0,
        }
    }

    pub fn visible(&self) -> &ChapterCoordinator {
        self.deck.visible().unwrap()
    }

    pub fn view(&self) -> ChapterView {
        ChapterView::of(self.visible())
    }

    /// Advances the clock by `ms` and ticks once.
    pub fn run_for(&mut self, ms: i64) -> Vec<SequencerEvent> {
        self.clock.advance_ms(ms);
        self.deck.tick(&self.clock)
    }

    /// Jumps from deadline to deadline until nothing is pending. Returns the
    /// events recorded on the way.
    pub fn run_until_idle(&mut self) -> Vec<SequencerEvent> {
        let mut events = Vec::new();
        for _ in 0..MAX_TIMERS {
            let Some(deadline) = self.deck.next_deadline() else {
                return events;
            };
            let wait = (deadline - self.clock.now()).num_milliseconds();
            events.extend(self.run_for(wait.max(0)));
        }
        panic!("chapter never went idle");
    }

    /// Applies the latest unfollowed switch request, as a host scrolling to
    /// the requested chapter would.
    pub fn follow_switch(&mut self) -> Vec<SequencerEvent> {
        let requests = self.switcher.requests();
        let request = requests.get(self.followed).cloned().unwrap();
        self.followed += 1;
        self.deck.show(&request.to, Uuid::new_v4(), &self.clock)
    }

    pub fn show(&mut self, key: &str) -> Vec<SequencerEvent> {
        self.deck.show(key, Uuid::new_v4(), &self.clock)
    }

    pub fn next(&mut self) -> Handled {
        let clock = &self.clock;
        self.deck
            .visible_mut()
            .unwrap()
            .handle_advance_step(&AdvanceStep { correlation_id: Uuid::new_v4() }, clock)
    }

    pub fn prev(&mut self) -> Handled {
        let clock = &self.clock;
        self.deck
            .visible_mut()
            .unwrap()
            .handle_retreat_step(&RetreatStep { correlation_id: Uuid::new_v4() }, clock)
    }

    pub fn jump(&mut self, stage_key: &str) -> Handled {
        let clock = &self.clock;
        self.deck.visible_mut().unwrap().handle_jump_to_stage(
            &JumpToStage {
                correlation_id: Uuid::new_v4(),
                stage_key: stage_key.to_owned(),
            },
            clock,
        )
    }

    pub fn toggle(&mut self) -> Vec<SequencerEvent> {
        let clock = &self.clock;
        self.deck
            .visible_mut()
            .unwrap()
            .handle_toggle_play_pause(&TogglePlayPause { correlation_id: Uuid::new_v4() }, clock)
    }
}
