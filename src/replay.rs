//! Offline replay of recorded pose-estimator output
//!
//! Recordings are JSON lines, one `{"timestamp_ms": .., "result": ..}` object
//! per frame. Blank lines are ignored.

use std::io::BufRead;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::PoseActionsConfig;
use crate::events::ActionEvent;
use crate::landmarks::PoseResult;
use crate::manager::ActionRecognitionManager;

/// One frame of a recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedFrame {
    /// Session time in milliseconds
    pub timestamp_ms: u64,
    /// Pose estimator output, absent when no body was detected
    #[serde(default)]
    pub result: Option<PoseResult>,
}

impl RecordedFrame {
    pub fn timestamp(&self) -> Duration {
        Duration::from_millis(self.timestamp_ms)
    }
}

/// Parse a JSON-lines recording
pub fn read_recording<R: BufRead>(reader: R) -> Result<Vec<RecordedFrame>> {
    let mut frames = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read recording line {}", number + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let frame: RecordedFrame = serde_json::from_str(&line)
            .with_context(|| format!("Invalid frame on line {}", number + 1))?;
        frames.push(frame);
    }

    if frames.windows(2).any(|w| w[1].timestamp_ms < w[0].timestamp_ms) {
        anyhow::bail!("Recording timestamps must not decrease");
    }
    Ok(frames)
}

/// Summary of a replay run
#[derive(Debug, Clone, Default)]
pub struct ReplayReport {
    pub frames: usize,
    pub calibrated: bool,
    pub events: Vec<ActionEvent>,
}

/// Feed recorded frames through a fresh session, one tick per frame
pub fn replay(config: &PoseActionsConfig, frames: &[RecordedFrame]) -> Result<ReplayReport> {
    let (mut manager, source) = ActionRecognitionManager::with_shared_source(config)?;
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    manager.subscribe(move |event| sink.lock().push(*event));

    for frame in frames {
        match &frame.result {
            Some(result) => source.set_pose_result(result.clone()),
            None => source.clear(),
        }
        let report = manager.tick(frame.timestamp());
        if !report.triggered.is_empty() {
            debug!("{} ms: {:?}", frame.timestamp_ms, report.triggered);
        }
    }

    let events = std::mem::take(&mut *events.lock());
    info!(
        "Replayed {} frames, {} actions recognized",
        frames.len(),
        events.len()
    );
    Ok(ReplayReport {
        frames: frames.len(),
        calibrated: manager.is_calibrated(),
        events,
    })
}
