use bevy::math::Vec3;

use super::{BodyJoint, LandmarkSource, LANDMARK_COUNT};
use crate::smoothing::SmoothingStage;

/// Smoothed landmark cache for the current tick
///
/// Recognizers only ever read this cache; an entry is `None` when the source
/// had no valid reading for that index this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseFrame {
    landmarks: [Option<Vec3>; LANDMARK_COUNT],
}

impl PoseFrame {
    pub fn empty() -> Self {
        Self {
            landmarks: [None; LANDMARK_COUNT],
        }
    }

    /// Frame with the given joints set, for callers that already hold smoothed data
    pub fn from_joints(joints: &[(BodyJoint, Vec3)]) -> Self {
        let mut frame = Self::empty();
        for &(joint, position) in joints {
            frame.set(joint.index(), Some(position));
        }
        frame
    }

    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.landmarks.get(index).copied().flatten()
    }

    pub fn joint(&self, joint: BodyJoint) -> Option<Vec3> {
        self.get(joint.index())
    }

    pub fn set(&mut self, index: usize, position: Option<Vec3>) {
        if let Some(slot) = self.landmarks.get_mut(index) {
            *slot = position;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.iter().all(Option::is_none)
    }
}

impl Default for PoseFrame {
    fn default() -> Self {
        Self::empty()
    }
}

/// Pulls one frame per tick from a source and smooths it
#[derive(Debug, Clone)]
pub struct PoseProcessor {
    smoothing: SmoothingStage,
    frame: PoseFrame,
}

impl PoseProcessor {
    pub fn new(smoothing_factor: f32) -> Self {
        Self {
            smoothing: SmoothingStage::new(smoothing_factor),
            frame: PoseFrame::empty(),
        }
    }

    /// Refresh the cache from the source, filtering every valid landmark once
    pub fn process(&mut self, source: &dyn LandmarkSource) -> &PoseFrame {
        let raw = source.read_frame();
        for (index, reading) in raw.into_iter().enumerate() {
            let smoothed = reading.map(|position| self.smoothing.filter(index, position));
            self.frame.set(index, smoothed);
        }
        &self.frame
    }

    pub fn frame(&self) -> &PoseFrame {
        &self.frame
    }

    /// Clear filter history and the cached frame
    pub fn reset(&mut self) {
        self.smoothing.reset();
        self.frame = PoseFrame::empty();
    }
}
