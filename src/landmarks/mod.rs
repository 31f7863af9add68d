//! Body landmark access for the recognition pipeline
//!
//! This module defines the boundary between the external pose estimator and
//! the recognition core:
//! - The fixed landmark index layout of the 33-point body model
//! - The [`LandmarkSource`] capability every pose provider implements
//! - A thread-safe single-slot snapshot provider ([`SharedPoseSource`])
//! - The per-tick smoothed landmark cache ([`PoseFrame`], [`PoseProcessor`])

use bevy::math::Vec3;

mod frame;
mod source;

pub use frame::{PoseFrame, PoseProcessor};
pub use source::{PoseLandmarks, PoseResult, RawLandmark, SharedPoseSource};

/// Number of landmarks reported by the body model
pub const LANDMARK_COUNT: usize = 33;

/// Raw positions for one frame, indexed by landmark, `None` when invalid
pub type RawFrame = [Option<Vec3>; LANDMARK_COUNT];

/// Joints consumed by the recognizers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyJoint {
    LeftShoulder,
    RightShoulder,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
}

impl BodyJoint {
    pub const ALL: [BodyJoint; 6] = [
        BodyJoint::LeftShoulder,
        BodyJoint::RightShoulder,
        BodyJoint::LeftWrist,
        BodyJoint::RightWrist,
        BodyJoint::LeftHip,
        BodyJoint::RightHip,
    ];

    /// Landmark index of this joint in the body model
    pub const fn index(self) -> usize {
        match self {
            BodyJoint::LeftShoulder => 11,
            BodyJoint::RightShoulder => 12,
            BodyJoint::LeftWrist => 15,
            BodyJoint::RightWrist => 16,
            BodyJoint::LeftHip => 23,
            BodyJoint::RightHip => 24,
        }
    }
}

/// Provider of raw landmark positions for a single tracked body
///
/// A landmark is valid only when it is present in the current frame and its
/// visibility reaches the provider's threshold. Before any frame arrives, or
/// when the tracked skeleton is missing, `has_valid_pose` is false and every
/// query returns `None`.
pub trait LandmarkSource: Send + Sync {
    /// Whether the current frame contains the tracked skeleton
    fn has_valid_pose(&self) -> bool;

    /// Whether the landmark at `index` is present and visible enough
    fn is_landmark_valid(&self, index: usize) -> bool;

    /// Position of a valid landmark
    fn landmark(&self, index: usize) -> Option<Vec3>;

    /// Read every landmark of the current frame at once
    fn read_frame(&self) -> RawFrame {
        let mut frame = [None; LANDMARK_COUNT];
        if !self.has_valid_pose() {
            return frame;
        }
        for (index, slot) in frame.iter_mut().enumerate() {
            *slot = self.landmark(index);
        }
        frame
    }
}
