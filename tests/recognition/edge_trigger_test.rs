//! Tests for edge triggering, cooldown and fail-closed behavior

use pose_actions::{ActionType, BodyJoint, CalibrationError, RecognitionState};

use crate::test_utils::*;

#[test]
fn test_sustained_shift_fires_once() {
    let mut session = TestSession::calibrated();

    for tick in 1..=20 {
        session.feed(PoseBuilder::standing().hips_shifted(-0.2), tick * 100);
    }

    let moves = session.events_of(ActionType::MoveLeft);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].timestamp(), ms(100));
    assert_eq!(moves[0].confidence(), 1.0);
    assert!(session.events_of(ActionType::MoveRight).is_empty());
    assert_eq!(
        session.manager.recognizer_state(ActionType::MoveLeft),
        Some(RecognitionState::Detecting)
    );
}

#[test]
fn test_cooldown_spaces_repeated_gestures() {
    let mut session = TestSession::calibrated();
    let cooldown = test_config().recognition.cooldown();

    for tick in 1..=30 {
        let pose = if tick % 2 == 1 {
            PoseBuilder::standing().hips_shifted(0.2)
        } else {
            PoseBuilder::standing()
        };
        session.feed(pose, tick * 100);
    }

    let moves = session.events_of(ActionType::MoveRight);
    assert!(moves.len() >= 2, "Expected repeated moves, got {}", moves.len());
    for pair in moves.windows(2) {
        assert!(pair[1].timestamp() - pair[0].timestamp() >= cooldown);
    }
}

#[test]
fn test_uncalibrated_session_fails_closed() {
    let mut session = TestSession::new(&test_config());

    for tick in 0..20 {
        let pose = PoseBuilder::standing()
            .hips_shifted(-0.3)
            .left_wrist_at(0.9)
            .right_wrist_at(0.9);
        session.feed(pose, tick * 100);
    }

    assert!(session.events().is_empty());
    for action_type in ActionType::ALL {
        assert_eq!(
            session.manager.recognizer_state(action_type),
            Some(RecognitionState::Idle)
        );
    }
}

#[test]
fn test_missing_landmark_suppresses_gesture() {
    let mut session = TestSession::calibrated();

    session.feed(
        PoseBuilder::standing()
            .left_wrist_at(0.9)
            .hidden(BodyJoint::LeftWrist),
        100,
    );
    assert!(session.events().is_empty());

    // Wrist visible again: the gesture is picked up on the next tick
    session.feed(PoseBuilder::standing().left_wrist_at(0.9), 200);
    assert_eq!(session.events_of(ActionType::GrabLeft).len(), 1);
}

#[test]
fn test_calibration_is_all_or_nothing() {
    let mut session = TestSession::new(&test_config());
    session.feed(PoseBuilder::standing().hidden(BodyJoint::RightHip), 0);

    assert_eq!(
        session.manager.perform_calibration().unwrap_err(),
        CalibrationError::MissingLandmark(BodyJoint::RightHip)
    );
    assert!(!session.manager.is_calibrated());
    assert!(session.manager.calibration().is_none());
}

#[test]
fn test_recalibration_restarts_recognizers() {
    let mut session = TestSession::calibrated();
    session.feed(PoseBuilder::standing().hips_shifted(-0.2), 100);
    assert_eq!(
        session.manager.recognizer_state(ActionType::MoveLeft),
        Some(RecognitionState::Cooldown)
    );

    // Shifted stance becomes the new neutral
    session.manager.perform_calibration().unwrap();
    assert_eq!(
        session.manager.recognizer_state(ActionType::MoveLeft),
        Some(RecognitionState::Idle)
    );
    session.feed(PoseBuilder::standing().hips_shifted(-0.2), 200);
    assert_eq!(session.events_of(ActionType::MoveLeft).len(), 1);
}
