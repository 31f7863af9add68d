use bevy::math::Vec3;

use crate::landmarks::LANDMARK_COUNT;

/// Exponential low-pass filter with independent state per landmark index
///
/// `smoothing_factor` is the share of history retained each step: 0.0 passes
/// raw values through, values close to 1.0 react slowly.
#[derive(Debug, Clone)]
pub struct SmoothingStage {
    smoothing_factor: f32,
    previous: [Vec3; LANDMARK_COUNT],
}

impl SmoothingStage {
    pub fn new(smoothing_factor: f32) -> Self {
        Self {
            smoothing_factor: smoothing_factor.clamp(0.0, 1.0),
            previous: [Vec3::ZERO; LANDMARK_COUNT],
        }
    }

    pub fn smoothing_factor(&self) -> f32 {
        self.smoothing_factor
    }

    /// Filter one reading; indices outside the body model pass through
    pub fn filter(&mut self, index: usize, raw: Vec3) -> Vec3 {
        let Some(previous) = self.previous.get_mut(index) else {
            return raw;
        };
        let smoothed = previous.lerp(raw, 1.0 - self.smoothing_factor);
        *previous = smoothed;
        smoothed
    }

    /// Zero all filter history
    pub fn reset(&mut self) {
        self.previous = [Vec3::ZERO; LANDMARK_COUNT];
    }
}

impl Default for SmoothingStage {
    fn default() -> Self {
        Self::new(0.7)
    }
}
