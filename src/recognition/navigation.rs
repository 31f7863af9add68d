use std::time::Duration;

use super::{ActionType, TriggerCondition};
use crate::calibration::Calibrator;
use crate::error::RecognitionResult;
use crate::hysteresis::HysteresisGate;
use crate::landmarks::PoseFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LateralDirection {
    Left,
    Right,
}

/// Sideways shift of the hip center away from its neutral position
#[derive(Debug, Clone)]
pub struct LateralMove {
    direction: LateralDirection,
    gate: HysteresisGate,
}

impl LateralMove {
    pub fn new(direction: LateralDirection, (enter, exit): (f32, f32)) -> RecognitionResult<Self> {
        Ok(Self {
            direction,
            gate: HysteresisGate::new(enter, exit)?,
        })
    }
}

impl TriggerCondition for LateralMove {
    fn action_type(&self) -> ActionType {
        match self.direction {
            LateralDirection::Left => ActionType::MoveLeft,
            LateralDirection::Right => ActionType::MoveRight,
        }
    }

    fn check(&mut self, frame: &PoseFrame, calibrator: &mut Calibrator, _now: Duration) -> bool {
        if !calibrator.update_center(frame) {
            return false;
        }
        let scale = calibrator.scale();
        if scale <= 0.0 {
            return false;
        }

        let offset = calibrator.neutral_center_x() - calibrator.center().x;
        let signal = match self.direction {
            LateralDirection::Left => offset,
            LateralDirection::Right => -offset,
        } / scale;
        self.gate.update(signal)
    }

    fn reset(&mut self) {
        self.gate.reset();
    }
}

/// Body center dropping relative to the neutral shoulder line
#[derive(Debug, Clone)]
pub struct ForwardLean {
    gate: HysteresisGate,
}

impl ForwardLean {
    pub fn new((enter, exit): (f32, f32)) -> RecognitionResult<Self> {
        Ok(Self {
            gate: HysteresisGate::new(enter, exit)?,
        })
    }
}

impl TriggerCondition for ForwardLean {
    fn action_type(&self) -> ActionType {
        ActionType::MoveForward
    }

    fn check(&mut self, frame: &PoseFrame, calibrator: &mut Calibrator, _now: Duration) -> bool {
        if !calibrator.update_center(frame) {
            return false;
        }
        let scale = calibrator.scale();
        if scale <= 0.0 {
            return false;
        }

        let signal = (calibrator.center().y - calibrator.neutral_shoulder_y()) / scale;
        self.gate.update(signal)
    }

    fn reset(&mut self) {
        self.gate.reset();
    }
}
