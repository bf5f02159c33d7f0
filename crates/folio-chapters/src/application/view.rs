//! Read model for renderers.

use std::collections::BTreeMap;

use serde::Serialize;

use super::coordinator::ChapterCoordinator;
use crate::domain::quiz::AnswerRecord;
use crate::domain::sequencer::{NavigationMode, Phase};

/// One entry of the stage nav bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Stage key, the argument of `JumpToStage`.
    pub key: String,
    /// Text to render.
    pub label: String,
    /// Whether this is the active stage.
    pub is_active: bool,
}

/// Everything a renderer needs to draw one chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterView {
    pub chapter_key: String,
    pub chapter_title: String,
    pub stage_key: String,
    pub stage_label: String,
    pub stage_index: usize,
    pub step_index: usize,
    pub step_count: usize,
    pub nav_items: Vec<NavItem>,
    /// Revealed title text.
    pub title: String,
    /// Revealed body text.
    pub body: String,
    pub phase: Phase,
    pub is_playing: bool,
    pub is_transitioning: bool,
    /// Renderers key restart animations off this counter.
    pub generation: u64,
    pub navigation_mode: NavigationMode,
    pub is_at_final_state: bool,
    pub can_go_next: bool,
    pub can_go_prev: bool,
    pub show_title_cursor: bool,
    pub show_body_cursor: bool,
    /// The play control is drawn as a replay control.
    pub show_replay_button: bool,
    /// Quiz answers by quiz id; empty for chapters without quizzes.
    pub answers: BTreeMap<String, AnswerRecord>,
}

impl ChapterView {
    /// Snapshots `coordinator`.
    #[must_use]
    pub fn of(coordinator: &ChapterCoordinator) -> Self {
        let sequencer = coordinator.sequencer();
        let config = sequencer.config();
        let stage = config.stage(sequencer.stage_index());
        let phase = sequencer.phase();
        let playing = sequencer.is_playing();

        Self {
            chapter_key: coordinator.key().to_owned(),
            chapter_title: coordinator.title().to_owned(),
            stage_key: stage.key.clone(),
            stage_label: stage.label().to_owned(),
            stage_index: sequencer.stage_index(),
            step_index: sequencer.step_index(),
            step_count: stage.steps.len(),
            nav_items: config
                .stages()
                .iter()
                .enumerate()
                .map(|(i, s)| NavItem {
                    key: s.key.clone(),
                    label: s.label().to_owned(),
                    is_active: i == sequencer.stage_index(),
                })
                .collect(),
            title: sequencer.revealed_title().to_owned(),
            body: sequencer.revealed_body().to_owned(),
            phase,
            is_playing: playing,
            is_transitioning: sequencer.is_transitioning(),
            generation: sequencer.generation(),
            navigation_mode: sequencer.navigation_mode(),
            is_at_final_state: coordinator.is_at_final_state(),
            can_go_next: coordinator.can_go_next(),
            can_go_prev: coordinator.can_go_prev(),
            show_title_cursor: playing
                && matches!(phase, Phase::TypingTitle | Phase::BackspacingTitle),
            show_body_cursor: playing && phase == Phase::TypingBody,
            show_replay_button: coordinator.is_at_final_state(),
            answers: coordinator.answers().answers().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use folio_test_support::{ManualClock, RecordingChapterSwitcher, chapter, config, stage, step};
    use uuid::Uuid;

    use super::*;
    use crate::domain::commands::AdvanceStep;

    fn coordinator() -> ChapterCoordinator {
        let entry = chapter(
            "design",
            config(vec![
                stage("ABOUT_DESIGN_KEY", vec![step("About design", "Most people")])
                    .with_label("About Design"),
                stage("WHAT_KEY", vec![step("What I do", "Design")]).with_label("What I do"),
            ]),
        );
        ChapterCoordinator::new(&entry, Some("landing"), None, Arc::new(RecordingChapterSwitcher::new()))
    }

    #[test]
    fn test_view_while_typing_title_shows_title_cursor() {
        // Arrange
        let clock = ManualClock::at_t0();
        let mut coordinator = coordinator();
        coordinator.activate(Uuid::new_v4(), &clock);
        clock.advance_ms(50);
        coordinator.tick(&clock);

        // Act
        let view = ChapterView::of(&coordinator);

        // Assert
        assert_eq!(view.title, "Ab");
        assert_eq!(view.body, "");
        assert_eq!(view.stage_label, "About Design");
        assert!(view.show_title_cursor);
        assert!(!view.show_body_cursor);
        assert!(!view.show_replay_button);
        assert!(view.can_go_prev);
        assert_eq!(
            view.nav_items.iter().map(|n| n.is_active).collect::<Vec<_>>(),
            vec![true, false]
        );
    }

    #[test]
    fn test_view_at_final_state_shows_replay_and_no_cursor() {
        let clock = ManualClock::at_t0();
        let mut coordinator = coordinator();
        coordinator.handle_advance_step(&AdvanceStep { correlation_id: Uuid::new_v4() }, &clock);

        let view = ChapterView::of(&coordinator);

        assert_eq!(view.stage_key, "WHAT_KEY");
        assert_eq!(view.title, "What I do");
        assert_eq!(view.body, "Design");
        assert!(view.is_at_final_state);
        assert!(view.show_replay_button);
        assert!(!view.can_go_next);
        assert!(!view.show_title_cursor);
        assert_eq!(view.navigation_mode, NavigationMode::Manual);
    }

    #[test]
    fn test_view_serializes_phase_in_snake_case() {
        let view = ChapterView::of(&coordinator());

        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["phase"], "typing_title");
        assert_eq!(json["navigation_mode"], "automatic");
        assert_eq!(json["nav_items"][1]["label"], "What I do");
    }
}
