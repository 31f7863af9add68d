//! End-to-end gesture scenarios

use pose_actions::{ActionType, BodyJoint};

use crate::test_utils::*;

/// Shoulders at 1.0 and hips at 0.5, scale 0.4
fn low_stance() -> PoseBuilder {
    PoseBuilder::standing()
        .joint(BodyJoint::LeftShoulder, -0.2, 1.0)
        .joint(BodyJoint::RightShoulder, 0.2, 1.0)
        .joint(BodyJoint::LeftWrist, -0.3, 1.0)
        .joint(BodyJoint::RightWrist, 0.3, 1.0)
        .joint(BodyJoint::LeftHip, -0.1, 0.5)
        .joint(BodyJoint::RightHip, 0.1, 0.5)
}

#[test]
fn test_grab_left_fires_once_on_threshold_crossing() {
    let mut session = TestSession::new(&test_config());
    session.feed(low_stance(), 0);
    let profile = session.manager.perform_calibration().unwrap();
    assert!((profile.scale - 0.4).abs() < 1e-6);

    // Normalized offsets: 0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.625, 0.625
    let wrist_heights = [1.0, 0.95, 0.9, 0.85, 0.8, 0.75, 0.75, 0.75];
    for (i, y) in wrist_heights.into_iter().enumerate() {
        let pose = low_stance().joint(BodyJoint::LeftWrist, -0.3, y);
        session.feed(pose, (i as u64 + 1) * 100);
    }

    let grabs = session.events_of(ActionType::GrabLeft);
    assert_eq!(grabs.len(), 1);
    // First tick above the 0.22 enter threshold
    assert_eq!(grabs[0].timestamp(), ms(300));
    assert!(session.events_of(ActionType::GrabRight).is_empty());
}

#[test]
fn test_gesture_hold_fires_after_hold_time() {
    let mut session = TestSession::calibrated();

    for tick in 1..=17 {
        session.feed(PoseBuilder::standing().fists_together(), tick * 100);
        if tick == 8 {
            // Armed at 100 ms, 750 ms of 1500 ms held by 850 ms
            assert!((session.manager.hold_progress(ms(850)) - 0.5).abs() < 1e-4);
        }
    }

    let holds = session.events_of(ActionType::GestureHold);
    assert_eq!(holds.len(), 1);
    assert_eq!(holds[0].timestamp(), ms(1600));
    assert!(holds[0].timestamp() >= ms(1500));
    // Timer disarmed by the trigger
    assert_eq!(session.manager.hold_progress(ms(1700)), 0.0);
}

#[test]
fn test_broken_hold_restarts_timer() {
    let mut session = TestSession::calibrated();

    for tick in 1..=10 {
        session.feed(PoseBuilder::standing().fists_together(), tick * 100);
    }
    session.feed(PoseBuilder::standing(), 1100);
    for tick in 12..=27 {
        session.feed(PoseBuilder::standing().fists_together(), tick * 100);
    }

    let holds = session.events_of(ActionType::GestureHold);
    assert_eq!(holds.len(), 1);
    assert_eq!(holds[0].timestamp(), ms(2700));
}

#[test]
fn test_either_hand_grab() {
    let mut session = TestSession::calibrated();
    session.feed(
        PoseBuilder::standing()
            .right_wrist_at(1.2)
            .hidden(BodyJoint::LeftWrist),
        100,
    );

    assert_eq!(session.events_of(ActionType::GrabGeneral).len(), 1);
    assert_eq!(session.events_of(ActionType::GrabRight).len(), 1);
    assert!(session.events_of(ActionType::GrabLeft).is_empty());
}
