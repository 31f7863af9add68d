//! Tests for recording replay

use std::fs::File;
use std::io::{BufReader, Write};

use pose_actions::config::PoseActionsConfig;
use pose_actions::replay::{read_recording, replay, RecordedFrame};
use pose_actions::ActionType;

use crate::test_utils::*;

fn write_recording(frames: &[RecordedFrame]) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = create_temp_dir();
    let path = dir.path().join("session.jsonl");
    let mut file = File::create(&path).unwrap();
    for frame in frames {
        writeln!(file, "{}", serde_json::to_string(frame).unwrap()).unwrap();
    }
    (dir, path)
}

#[test]
fn test_replay_recognizes_recorded_grab() {
    let mut config = PoseActionsConfig::default();
    config.recognition.smoothing_factor = 0.0;
    config.session.calibration_delay_secs = 0.5;

    // Stand still for a second, then lower the left wrist
    let frames: Vec<RecordedFrame> = (0..60)
        .map(|i| {
            let pose = if i < 30 {
                PoseBuilder::standing()
            } else {
                PoseBuilder::standing().left_wrist_at(0.9)
            };
            RecordedFrame {
                timestamp_ms: i * 33,
                result: Some(pose.build()),
            }
        })
        .collect();
    let (_dir, path) = write_recording(&frames);

    let loaded = read_recording(BufReader::new(File::open(&path).unwrap())).unwrap();
    assert_eq!(loaded, frames);

    let report = replay(&config, &loaded).unwrap();
    assert!(report.calibrated);
    assert_eq!(report.frames, 60);
    let grabs: Vec<_> = report
        .events
        .iter()
        .filter(|e| e.action_type() == ActionType::GrabLeft)
        .collect();
    assert_eq!(grabs.len(), 1);
    assert_eq!(grabs[0].timestamp(), ms(990));
}

#[test]
fn test_replay_with_dropped_frames() {
    let mut config = PoseActionsConfig::default();
    config.recognition.smoothing_factor = 0.0;
    config.session.calibration_delay_secs = 0.0;

    let frames = vec![
        RecordedFrame {
            timestamp_ms: 0,
            result: Some(PoseBuilder::standing().build()),
        },
        RecordedFrame {
            timestamp_ms: 33,
            result: None,
        },
        RecordedFrame {
            timestamp_ms: 66,
            result: Some(PoseBuilder::standing().hips_shifted(0.2).build()),
        },
    ];

    let report = replay(&config, &frames).unwrap();
    assert!(report.calibrated);
    let actions: Vec<_> = report.events.iter().map(|e| e.action_type()).collect();
    assert_eq!(actions, vec![ActionType::MoveRight]);
}
