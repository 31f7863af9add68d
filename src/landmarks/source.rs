//! Single-slot pose snapshot shared between the estimator thread and the tick

use std::sync::Arc;

use bevy::math::Vec3;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::{LandmarkSource, RawFrame, LANDMARK_COUNT};
use crate::config::SourceConfig;

/// One landmark as delivered by the pose estimator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Visibility score (0.0-1.0), absent when the estimator omits it
    #[serde(default)]
    pub visibility: Option<f32>,
}

impl RawLandmark {
    pub fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: Some(visibility),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Landmarks of one detected skeleton
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseLandmarks {
    pub landmarks: Vec<RawLandmark>,
}

/// Complete estimator output for one inference frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseResult {
    /// Image-space landmarks, one entry per detected skeleton
    #[serde(default)]
    pub pose_landmarks: Vec<PoseLandmarks>,
    /// World-space landmarks in meters, one entry per detected skeleton
    #[serde(default)]
    pub pose_world_landmarks: Vec<PoseLandmarks>,
}

impl PoseResult {
    /// Result with a single skeleton reported identically in both spaces
    pub fn single(landmarks: Vec<RawLandmark>) -> Self {
        Self {
            pose_landmarks: vec![PoseLandmarks {
                landmarks: landmarks.clone(),
            }],
            pose_world_landmarks: vec![PoseLandmarks { landmarks }],
        }
    }
}

/// Landmark source backed by the latest estimator result
///
/// The estimator thread replaces the whole snapshot with
/// [`SharedPoseSource::set_pose_result`]; readers clone the `Arc` under the
/// lock and never observe a partially written result. Cloning the handle
/// shares the same slot.
#[derive(Debug, Clone)]
pub struct SharedPoseSource {
    slot: Arc<Mutex<Option<Arc<PoseResult>>>>,
    settings: SourceConfig,
}

impl SharedPoseSource {
    pub fn new(settings: SourceConfig) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            settings,
        }
    }

    /// Replace the current snapshot
    pub fn set_pose_result(&self, result: PoseResult) {
        *self.slot.lock() = Some(Arc::new(result));
    }

    /// Drop the current snapshot
    pub fn clear(&self) {
        *self.slot.lock() = None;
    }

    pub fn snapshot(&self) -> Option<Arc<PoseResult>> {
        self.slot.lock().clone()
    }

    pub fn settings(&self) -> &SourceConfig {
        &self.settings
    }

    /// Landmarks of the tracked skeleton in the configured coordinate space
    fn tracked<'a>(&self, result: &'a PoseResult) -> Option<&'a [RawLandmark]> {
        let pose_index = self.settings.pose_index;
        let image_space = result.pose_landmarks.get(pose_index)?;
        let landmarks = if self.settings.use_world_coordinates {
            &result.pose_world_landmarks.get(pose_index)?.landmarks
        } else {
            &image_space.landmarks
        };
        (!landmarks.is_empty()).then_some(landmarks.as_slice())
    }

    fn is_visible(&self, landmark: &RawLandmark) -> bool {
        landmark
            .visibility
            .is_some_and(|v| v >= self.settings.visibility_threshold)
    }

    fn valid_position(&self, result: &PoseResult, index: usize) -> Option<Vec3> {
        let landmark = self.tracked(result)?.get(index)?;
        self.is_visible(landmark).then(|| landmark.position())
    }
}

impl LandmarkSource for SharedPoseSource {
    fn has_valid_pose(&self) -> bool {
        self.snapshot()
            .is_some_and(|result| self.tracked(&result).is_some())
    }

    fn is_landmark_valid(&self, index: usize) -> bool {
        self.landmark(index).is_some()
    }

    fn landmark(&self, index: usize) -> Option<Vec3> {
        let result = self.snapshot()?;
        self.valid_position(&result, index)
    }

    fn read_frame(&self) -> RawFrame {
        let mut frame = [None; LANDMARK_COUNT];
        let Some(result) = self.snapshot() else {
            return frame;
        };
        for (index, slot) in frame.iter_mut().enumerate() {
            *slot = self.valid_position(&result, index);
        }
        frame
    }
}
