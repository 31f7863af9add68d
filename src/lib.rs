//! Pose Actions Library
//!
//! Turns streamed body landmarks from a pose estimator into discrete game
//! actions: sideways and forward body movement, one- or two-handed grabs, and
//! a held two-fist gesture. The pipeline per frame is smoothing, calibration
//! against a neutral pose, hysteresis-gated gesture signals, edge-triggered
//! recognizers with cooldown, and finally an event bus for listeners.

pub mod calibration;
pub mod config;
pub mod error;
pub mod events;
pub mod hysteresis;
pub mod landmarks;
pub mod manager;
pub mod plugin;
pub mod recognition;
pub mod replay;
pub mod smoothing;

// Re-export commonly used types
pub use calibration::{CalibrationProfile, Calibrator};
pub use config::{ConfigValidation, PoseActionsConfig, RecognitionConfig, SessionConfig, SourceConfig};
pub use error::{CalibrationError, RecognitionError, RecognitionResult};
pub use events::{ActionEvent, ActionListener, EventBus};
pub use landmarks::{BodyJoint, LandmarkSource, PoseFrame, PoseResult, SharedPoseSource};
pub use manager::ActionRecognitionManager;
pub use plugin::{CalibrationRequest, PoseActionEvent, PoseActionStatus, PoseActionsPlugin, PoseSourceHandle};
pub use recognition::{ActionCategory, ActionType, Coordinator, RecognitionState};
