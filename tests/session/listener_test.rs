//! Tests for listener delivery through the manager

use std::sync::Arc;

use parking_lot::Mutex;
use pose_actions::config::{PoseActionsConfig, RecognitionConfig, SessionConfig};
use pose_actions::{ActionEvent, ActionListener, ActionType};

use crate::test_utils::*;

#[derive(Default)]
struct RecordingListener {
    seen: Mutex<Vec<ActionType>>,
}

impl ActionListener for RecordingListener {
    fn on_action_triggered(&self, event: &ActionEvent) -> anyhow::Result<()> {
        self.seen.lock().push(event.action_type());
        Ok(())
    }
}

struct RejectingListener;

impl ActionListener for RejectingListener {
    fn on_action_triggered(&self, event: &ActionEvent) -> anyhow::Result<()> {
        anyhow::bail!("cannot handle {:?}", event.action_type())
    }
}

#[test]
fn test_listeners_receive_actions_despite_failures() {
    let mut session = TestSession::calibrated();
    let recorder = Arc::new(RecordingListener::default());
    let recorder_handle: Arc<dyn ActionListener> = recorder.clone();

    assert!(session.manager.register_listener(Arc::new(RejectingListener)));
    assert!(session.manager.register_listener(Arc::clone(&recorder_handle)));
    assert!(!session.manager.register_listener(Arc::clone(&recorder_handle)));

    session.feed(PoseBuilder::standing().hips_shifted(-0.2), 100);
    assert_eq!(*recorder.seen.lock(), vec![ActionType::MoveLeft]);

    assert!(session.manager.unregister_listener(&recorder_handle));
    session.feed(PoseBuilder::standing().hips_shifted(0.2), 700);
    assert_eq!(recorder.seen.lock().len(), 1);
}

#[test]
fn test_event_channel_delivers_in_order() {
    let mut session = TestSession::calibrated();
    let receiver = session.manager.event_channel(16);

    session.feed(PoseBuilder::standing().left_wrist_at(0.9), 100);
    let received: Vec<ActionType> = receiver.try_iter().map(|e| e.action_type()).collect();
    assert_eq!(received, vec![ActionType::GrabLeft, ActionType::GrabGeneral]);
}

#[test]
fn test_abandoned_channels_are_dropped() {
    let mut session = TestSession::calibrated();
    let baseline = session.manager.listener_count();
    for _ in 0..3 {
        drop(session.manager.event_channel(16));
    }
    let receiver = session.manager.event_channel(16);
    assert_eq!(session.manager.listener_count(), baseline + 4);

    session.feed(PoseBuilder::standing().left_wrist_at(0.9), 100);
    assert_eq!(session.manager.listener_count(), baseline + 1);
    assert_eq!(receiver.try_iter().count(), 2);
}

#[test]
fn test_shutdown_stops_delivery() {
    let mut session = TestSession::calibrated();
    let receiver = session.manager.event_channel(16);
    session.manager.shutdown();

    session.feed(PoseBuilder::standing().left_wrist_at(0.9), 100);
    assert!(receiver.try_recv().is_err());
    assert!(session.events().is_empty());
}

#[test]
fn test_auto_calibration_with_smoothing() {
    let config = PoseActionsConfig {
        recognition: RecognitionConfig::default(),
        session: SessionConfig {
            auto_calibrate: true,
            calibration_delay_secs: 2.0,
            calibration_retry_secs: 1.0,
        },
        ..PoseActionsConfig::default()
    };
    let mut session = TestSession::new(&config);

    for tick in 0..=60 {
        session.feed(PoseBuilder::standing(), tick * 33);
    }
    assert!(!session.manager.is_calibrated());

    // Smoothed landmarks have converged by the first attempt at 2 s
    session.feed(PoseBuilder::standing(), 2000);
    let profile = *session.manager.calibration().unwrap();
    assert!((profile.scale - 0.4).abs() < 1e-4);
    assert!((profile.neutral_shoulder_y - 1.4).abs() < 1e-4);
}
