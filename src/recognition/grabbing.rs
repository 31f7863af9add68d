use std::time::Duration;

use super::{ActionType, TriggerCondition};
use crate::calibration::Calibrator;
use crate::error::RecognitionResult;
use crate::hysteresis::HysteresisGate;
use crate::landmarks::{BodyJoint, PoseFrame};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn joints(self) -> (BodyJoint, BodyJoint) {
        match self {
            Side::Left => (BodyJoint::LeftShoulder, BodyJoint::LeftWrist),
            Side::Right => (BodyJoint::RightShoulder, BodyJoint::RightWrist),
        }
    }
}

/// Shoulder-to-wrist height offset for one side, in scale units
///
/// `None` when either landmark of that side is missing or the scale is unusable.
pub fn hand_raise_signal(frame: &PoseFrame, side: Side, scale: f32) -> Option<f32> {
    if scale <= 0.0 {
        return None;
    }
    let (shoulder, wrist) = side.joints();
    let shoulder = frame.joint(shoulder)?;
    let wrist = frame.joint(wrist)?;
    Some((shoulder.y - wrist.y) / scale)
}

/// Single-hand grab, hysteresis gated
#[derive(Debug, Clone)]
pub struct HandRaise {
    side: Side,
    gate: HysteresisGate,
}

impl HandRaise {
    pub fn new(side: Side, (enter, exit): (f32, f32)) -> RecognitionResult<Self> {
        Ok(Self {
            side,
            gate: HysteresisGate::new(enter, exit)?,
        })
    }
}

impl TriggerCondition for HandRaise {
    fn action_type(&self) -> ActionType {
        match self.side {
            Side::Left => ActionType::GrabLeft,
            Side::Right => ActionType::GrabRight,
        }
    }

    fn check(&mut self, frame: &PoseFrame, calibrator: &mut Calibrator, _now: Duration) -> bool {
        match hand_raise_signal(frame, self.side, calibrator.scale()) {
            Some(signal) => self.gate.update(signal),
            None => false,
        }
    }

    fn reset(&mut self) {
        self.gate.reset();
    }
}

/// Grab with either hand against the raw threshold
#[derive(Debug, Clone)]
pub struct EitherHandRaise {
    threshold: f32,
}

impl EitherHandRaise {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl TriggerCondition for EitherHandRaise {
    fn action_type(&self) -> ActionType {
        ActionType::GrabGeneral
    }

    fn check(&mut self, frame: &PoseFrame, calibrator: &mut Calibrator, _now: Duration) -> bool {
        let scale = calibrator.scale();
        [Side::Left, Side::Right]
            .into_iter()
            .filter_map(|side| hand_raise_signal(frame, side, scale))
            .any(|signal| signal > self.threshold)
    }
}
