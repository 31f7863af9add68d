use std::time::Duration;

use super::{ActionType, TriggerCondition};
use crate::calibration::Calibrator;
use crate::landmarks::{BodyJoint, PoseFrame};

/// Both wrists held close together at torso height for a minimum time
#[derive(Debug, Clone)]
pub struct FistHold {
    dist_threshold: f32,
    hold_time: Duration,
    hold_start: Option<Duration>,
}

impl FistHold {
    pub fn new(dist_threshold: f32, hold_time: Duration) -> Self {
        Self {
            dist_threshold,
            hold_time,
            hold_start: None,
        }
    }

    pub fn is_holding(&self) -> bool {
        self.hold_start.is_some()
    }

    /// Elapsed share of the required hold, 0.0 when not holding
    pub fn hold_progress(&self, now: Duration) -> f32 {
        let Some(start) = self.hold_start else {
            return 0.0;
        };
        if self.hold_time.is_zero() {
            return 1.0;
        }
        (now.saturating_sub(start).as_secs_f32() / self.hold_time.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn pose_matches(&self, frame: &PoseFrame, scale: f32) -> Option<bool> {
        let left_wrist = frame.joint(BodyJoint::LeftWrist)?;
        let right_wrist = frame.joint(BodyJoint::RightWrist)?;
        let shoulder_y = frame.joint(BodyJoint::LeftShoulder)?.y;
        let hip_y = frame.joint(BodyJoint::RightHip)?.y;
        if scale <= 0.0 {
            return None;
        }

        let close = left_wrist.distance(right_wrist) / scale < self.dist_threshold;
        let wrist_y = (left_wrist.y + right_wrist.y) * 0.5;
        // Inclusive band, independent of the vertical axis direction
        let at_torso = wrist_y >= hip_y.min(shoulder_y) && wrist_y <= hip_y.max(shoulder_y);
        Some(close && at_torso)
    }
}

impl TriggerCondition for FistHold {
    fn action_type(&self) -> ActionType {
        ActionType::GestureHold
    }

    fn check(&mut self, frame: &PoseFrame, calibrator: &mut Calibrator, now: Duration) -> bool {
        if self.pose_matches(frame, calibrator.scale()) != Some(true) {
            self.hold_start = None;
            return false;
        }

        let start = *self.hold_start.get_or_insert(now);
        now.saturating_sub(start) >= self.hold_time
    }

    fn on_trigger(&mut self) {
        self.hold_start = None;
    }

    fn reset(&mut self) {
        self.hold_start = None;
    }

    fn progress(&self, now: Duration) -> Option<f32> {
        Some(self.hold_progress(now))
    }
}
