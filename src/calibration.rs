//! Neutral-pose calibration and body-center tracking

use bevy::math::Vec3;
use tracing::{debug, info, warn};

use crate::error::CalibrationError;
use crate::landmarks::{BodyJoint, PoseFrame};

/// Smallest shoulder width accepted as a normalization unit
pub const MIN_BODY_SCALE: f32 = 1e-3;

/// Neutral pose captured at calibration time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationProfile {
    /// Shoulder-to-shoulder distance, the unit of every gesture threshold
    pub scale: f32,
    /// Hip midpoint at capture time
    pub origin_center: Vec3,
    /// Horizontal hip-center position at capture time
    pub neutral_center_x: f32,
    /// Mean shoulder height at capture time
    pub neutral_shoulder_y: f32,
}

fn midpoint(a: Vec3, b: Vec3) -> Vec3 {
    (a + b) * 0.5
}

fn require(frame: &PoseFrame, joint: BodyJoint) -> Result<Vec3, CalibrationError> {
    frame
        .joint(joint)
        .ok_or(CalibrationError::MissingLandmark(joint))
}

/// Holds the calibration profile and the continuously tracked body center
#[derive(Debug, Clone, Default)]
pub struct Calibrator {
    profile: Option<CalibrationProfile>,
    center: Vec3,
}

impl Calibrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the neutral pose from the current frame
    ///
    /// Needs both shoulders and both hips. On any failure the previous state,
    /// calibrated or not, is left untouched.
    pub fn calibrate(&mut self, frame: &PoseFrame) -> Result<CalibrationProfile, CalibrationError> {
        let left_shoulder = require(frame, BodyJoint::LeftShoulder)?;
        let right_shoulder = require(frame, BodyJoint::RightShoulder)?;
        let left_hip = require(frame, BodyJoint::LeftHip)?;
        let right_hip = require(frame, BodyJoint::RightHip)?;

        let scale = left_shoulder.distance(right_shoulder);
        if !scale.is_finite() || scale < MIN_BODY_SCALE {
            warn!("Rejecting calibration with degenerate scale {}", scale);
            return Err(CalibrationError::DegenerateScale {
                scale,
                minimum: MIN_BODY_SCALE,
            });
        }

        let center = midpoint(left_hip, right_hip);
        let profile = CalibrationProfile {
            scale,
            origin_center: center,
            neutral_center_x: center.x,
            neutral_shoulder_y: midpoint(left_shoulder, right_shoulder).y,
        };

        self.profile = Some(profile);
        self.center = center;
        info!(
            "Calibrated: scale {:.3}, neutral x {:.3}, shoulder y {:.3}",
            profile.scale, profile.neutral_center_x, profile.neutral_shoulder_y
        );
        Ok(profile)
    }

    /// Recompute the body center from the current hips
    ///
    /// Returns false and keeps the last known center when a hip is missing.
    pub fn update_center(&mut self, frame: &PoseFrame) -> bool {
        match (frame.joint(BodyJoint::LeftHip), frame.joint(BodyJoint::RightHip)) {
            (Some(left), Some(right)) => {
                self.center = midpoint(left, right);
                true
            }
            _ => {
                debug!("Hip landmarks missing, keeping last body center");
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.profile = None;
        self.center = Vec3::ZERO;
    }

    pub fn is_calibrated(&self) -> bool {
        self.profile.is_some()
    }

    pub fn profile(&self) -> Option<&CalibrationProfile> {
        self.profile.as_ref()
    }

    /// Calibrated scale, 0.0 when uncalibrated
    pub fn scale(&self) -> f32 {
        self.profile.map_or(0.0, |p| p.scale)
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn neutral_center_x(&self) -> f32 {
        self.profile.map_or(0.0, |p| p.neutral_center_x)
    }

    pub fn neutral_shoulder_y(&self) -> f32 {
        self.profile.map_or(0.0, |p| p.neutral_shoulder_y)
    }
}
