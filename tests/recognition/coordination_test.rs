//! Tests for category priority and navigation/grab exclusivity

use pose_actions::{ActionType, RecognitionState};

use crate::test_utils::*;

const GRABS: [ActionType; 3] = [
    ActionType::GrabLeft,
    ActionType::GrabRight,
    ActionType::GrabGeneral,
];

#[test]
fn test_navigation_trigger_idles_grabs() {
    let mut session = TestSession::calibrated();

    let report = session.feed(PoseBuilder::standing().left_wrist_at(0.9), 100);
    assert_eq!(
        report.triggered,
        vec![ActionType::GrabLeft, ActionType::GrabGeneral]
    );

    // Past the cooldown the held grab is only detecting
    session.feed(PoseBuilder::standing().left_wrist_at(0.9), 700);
    assert_eq!(
        session.manager.recognizer_state(ActionType::GrabLeft),
        Some(RecognitionState::Detecting)
    );

    let report = session.feed(
        PoseBuilder::standing().left_wrist_at(0.9).hips_shifted(-0.2),
        800,
    );
    assert!(report.navigation_triggered);
    assert_eq!(report.triggered, vec![ActionType::MoveLeft]);
    for grab in GRABS {
        assert_eq!(
            session.manager.recognizer_state(grab),
            Some(RecognitionState::Idle)
        );
    }
}

#[test]
fn test_every_navigation_recognizer_updates() {
    let mut session = TestSession::calibrated();

    // MoveLeft fires first; MoveRight still sees its own gate
    session.feed(PoseBuilder::standing().hips_shifted(-0.2), 100);
    let report = session.feed(PoseBuilder::standing().hips_shifted(0.2), 700);

    assert_eq!(report.triggered, vec![ActionType::MoveRight]);
    assert_eq!(session.events_of(ActionType::MoveLeft).len(), 1);
    assert_eq!(session.events_of(ActionType::MoveRight).len(), 1);
}

#[test]
fn test_hold_runs_alongside_navigation() {
    let mut session = TestSession::calibrated();

    for tick in 1..=16 {
        session.feed(
            PoseBuilder::standing().fists_together().hips_shifted(-0.2),
            tick * 100,
        );
    }

    assert_eq!(session.events_of(ActionType::MoveLeft).len(), 1);
    assert_eq!(session.events_of(ActionType::GestureHold).len(), 1);
}

#[test]
fn test_reset_session_requires_recalibration() {
    let mut session = TestSession::calibrated();
    session.manager.reset_session();

    session.feed(PoseBuilder::standing().hips_shifted(-0.2), 100);
    assert!(session.events().is_empty());
    assert!(!session.manager.is_calibrated());
}
