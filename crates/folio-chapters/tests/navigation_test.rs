//! Integration tests for manual navigation and chapter hand-off.

mod common;

use folio_chapters::domain::commands::{AnswerQuestion, ReplayQuestion};
use folio_chapters::domain::sequencer::{NavigationMode, NavigationOutcome, Phase};
use folio_core::navigation::SwitchDirection;
use uuid::Uuid;

#[test]
fn test_prev_at_start_of_first_chapter_goes_nowhere() {
    let mut harness = common::Harness::portfolio();

    let handled = harness.prev();

    assert_eq!(handled.outcome, NavigationOutcome::StartOfChapter);
    assert_eq!(handled.switch, None);
    assert!(!harness.view().can_go_prev);
    assert!(harness.view().is_playing);
}

#[test]
fn test_next_steps_instantly_through_landing_stages() {
    // Arrange
    let mut harness = common::Harness::portfolio();

    // Act: seven insults, then the first intro step.
    for _ in 0..7 {
        harness.next();
    }

    // Assert
    let view = harness.view();
    assert_eq!(view.stage_key, "Intro");
    assert_eq!(view.step_index, 0);
    assert_eq!(view.body, "Hi there!");
    assert_eq!(view.phase, Phase::Pausing);
    assert!(!view.is_playing);
    assert_eq!(view.navigation_mode, NavigationMode::Manual);
    assert!(harness.run_for(60_000).is_empty());
}

#[test]
fn test_next_past_the_end_hands_off_to_the_next_chapter() {
    // Arrange
    let mut harness = common::Harness::portfolio();
    harness.show("design");
    harness.jump("UI_DESIGNER_KEY");
    harness.next();
    harness.next();

    // Act
    let handled = harness.next();
    harness.follow_switch();

    // Assert
    let switch = handled.switch.unwrap();
    assert_eq!(handled.outcome, NavigationOutcome::EndOfChapter);
    assert_eq!((switch.from.as_str(), switch.to.as_str()), ("design", "work"));
    assert_eq!(switch.direction, SwitchDirection::Forward);
    assert_eq!(harness.view().chapter_key, "work");
    assert!(harness.view().is_playing);
    let design = harness.deck.get("design").unwrap();
    assert!(!design.sequencer().is_playing());
    assert_eq!(design.next_deadline(), None);
}

#[test]
fn test_returning_to_a_manually_navigated_chapter_keeps_its_position() {
    // Arrange
    let mut harness = common::Harness::portfolio();
    harness.show("design");
    harness.jump("UI_DESIGNER_KEY");
    for _ in 0..3 {
        harness.next();
    }
    harness.follow_switch();

    // Act
    let handled = harness.prev();
    harness.follow_switch();

    // Assert
    assert_eq!(handled.switch.unwrap().direction, SwitchDirection::Backward);
    let view = harness.view();
    assert_eq!(view.chapter_key, "design");
    assert_eq!(view.stage_key, "UI_DESIGNER_KEY");
    assert_eq!(view.step_index, 2);
    assert!(!view.is_playing);
    assert!(view.show_replay_button);
}

#[test]
fn test_play_at_the_end_replays_in_autoplay() {
    let mut harness = common::Harness::portfolio();
    harness.show("design");
    harness.jump("UI_DESIGNER_KEY");
    harness.next();
    harness.next();

    harness.toggle();

    let view = harness.view();
    assert_eq!(view.stage_key, "ABOUT_DESIGN_KEY");
    assert_eq!((view.title.as_str(), view.body.as_str()), ("", ""));
    assert!(view.is_playing);
    assert_eq!(view.navigation_mode, NavigationMode::Automatic);
}

#[test]
fn test_jump_to_unknown_stage_leaves_playback_alone() {
    let mut harness = common::Harness::portfolio();
    harness.run_for(100);
    let before = harness.view();

    let handled = harness.jump("NOT_A_STAGE");

    assert_eq!(handled.outcome, NavigationOutcome::Ignored);
    assert!(handled.events.is_empty());
    assert_eq!(harness.view(), before);
}

#[test]
fn test_quiz_answers_survive_navigation_and_reset_on_replay() {
    // Arrange
    let mut harness = common::Harness::portfolio();
    harness.show("work");
    harness.jump("Question 1");
    let clock = &harness.clock;
    let work = harness.deck.visible_mut().unwrap();

    // Act
    let wrong = work
        .handle_answer_question(
            &AnswerQuestion {
                correlation_id: Uuid::new_v4(),
                quiz_id: "designSystem".to_owned(),
                option_index: 0,
            },
            clock,
        )
        .unwrap();
    work.handle_replay_question(
        &ReplayQuestion {
            correlation_id: Uuid::new_v4(),
            quiz_id: "designSystem".to_owned(),
        },
        clock,
    )
    .unwrap();
    let right = work
        .handle_answer_question(
            &AnswerQuestion {
                correlation_id: Uuid::new_v4(),
                quiz_id: "designSystem".to_owned(),
                option_index: 1,
            },
            clock,
        )
        .unwrap();
    harness.jump("Question 2");

    // Assert
    assert!(!wrong.correct);
    assert!(right.correct);
    let view = harness.view();
    assert_eq!(view.stage_key, "Question 2");
    assert_eq!(view.answers.len(), 1);
    assert!(view.answers["designSystem"].correct);
}
