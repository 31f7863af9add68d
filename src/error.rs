use thiserror::Error;

use crate::landmarks::BodyJoint;

/// Reasons a neutral-pose calibration can be rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// One of the four anchor joints had no valid reading this frame
    #[error("Calibration landmark missing: {0:?}")]
    MissingLandmark(BodyJoint),

    /// Shoulder width too small to normalize against
    #[error("Degenerate body scale {scale} (minimum {minimum})")]
    DegenerateScale { scale: f32, minimum: f32 },
}

/// Errors raised while building the recognition pipeline
#[derive(Debug, Error)]
pub enum RecognitionError {
    /// Hysteresis thresholds must leave a dead band
    #[error("Invalid hysteresis thresholds: enter {enter} must exceed exit {exit}")]
    InvalidThresholds { enter: f32, exit: f32 },

    /// Configuration rejected by validation
    #[error("Invalid recognition configuration: {0}")]
    InvalidConfig(String),

    /// Calibration failed
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

impl From<anyhow::Error> for RecognitionError {
    fn from(err: anyhow::Error) -> Self {
        RecognitionError::InvalidConfig(format!("{:#}", err))
    }
}

/// Result type for recognition operations
pub type RecognitionResult<T> = Result<T, RecognitionError>;
