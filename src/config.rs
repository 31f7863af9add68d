//! Configuration schema for the recognition pipeline
//!
//! All gesture thresholds are expressed in multiples of the calibrated body
//! scale (shoulder width), so the defaults work for any body size. Every
//! section validates its own ranges; files are loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const CONFIG_DIR_NAME: &str = "pose-actions";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Range validation shared by every configuration section
pub trait ConfigValidation {
    /// Validate the section for consistency
    fn validate(&self) -> Result<()>;
}

fn check_range(name: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        anyhow::bail!("{} out of range [{}, {}]: {}", name, min, max, value);
    }
    Ok(())
}

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseActionsConfig {
    /// Gesture thresholds and timing
    pub recognition: RecognitionConfig,
    /// Landmark source settings
    pub source: SourceConfig,
    /// Calibration scheduling
    pub session: SessionConfig,
}

impl ConfigValidation for PoseActionsConfig {
    fn validate(&self) -> Result<()> {
        self.recognition.validate()?;
        self.source.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

impl PoseActionsConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Load and validate a configuration file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {:?}", path))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid configuration {:?}", path))?;
        info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    /// Write the configuration as TOML, creating parent directories
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)
            .with_context(|| format!("Failed to write configuration {:?}", path))?;
        Ok(())
    }

    /// Default configuration file location in the user config directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Configuration loading failed, using defaults: {:#}", e);
                Self::default()
            }
        }
    }
}

/// Gesture thresholds, smoothing and timing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Sideways hip shift that triggers a move (scale units)
    pub nav_x_threshold: f32,
    /// Wrist-below-shoulder offset that triggers a grab (scale units)
    pub grab_y_threshold: f32,
    /// Maximum wrist-to-wrist distance for the hold gesture (scale units)
    pub fist_dist_threshold: f32,
    /// Seconds the hold gesture must be kept
    pub fist_hold_time: f32,
    /// Landmark smoothing (0.0 = raw, higher = smoother)
    pub smoothing_factor: f32,
    /// Enter threshold multiplier applied to base thresholds
    pub hysteresis_enter_multiplier: f32,
    /// Exit threshold multiplier applied to base thresholds
    pub hysteresis_exit_multiplier: f32,
    /// Seconds a recognizer stays silent after triggering
    pub cooldown_time: f32,
    /// Vertical body-center offset that triggers a forward move (scale units)
    pub forward_y_threshold: f32,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            nav_x_threshold: 0.3,
            grab_y_threshold: 0.2,
            fist_dist_threshold: 0.25,
            fist_hold_time: 1.5,
            smoothing_factor: 0.7,
            hysteresis_enter_multiplier: 1.1,
            hysteresis_exit_multiplier: 0.9,
            cooldown_time: 0.5,
            forward_y_threshold: 0.15,
        }
    }
}

impl ConfigValidation for RecognitionConfig {
    fn validate(&self) -> Result<()> {
        check_range("nav_x_threshold", self.nav_x_threshold, 0.1, 1.0)?;
        check_range("grab_y_threshold", self.grab_y_threshold, 0.1, 0.5)?;
        check_range("fist_dist_threshold", self.fist_dist_threshold, 0.1, 0.5)?;
        check_range("fist_hold_time", self.fist_hold_time, 0.5, 5.0)?;
        check_range("smoothing_factor", self.smoothing_factor, 0.0, 1.0)?;
        check_range(
            "hysteresis_enter_multiplier",
            self.hysteresis_enter_multiplier,
            1.0,
            2.0,
        )?;
        check_range(
            "hysteresis_exit_multiplier",
            self.hysteresis_exit_multiplier,
            0.5,
            1.0,
        )?;
        check_range("cooldown_time", self.cooldown_time, 0.0, 5.0)?;
        check_range("forward_y_threshold", self.forward_y_threshold, 0.1, 0.5)?;

        // Both multipliers at 1.0 would collapse the dead band
        if self.hysteresis_enter_multiplier <= self.hysteresis_exit_multiplier {
            anyhow::bail!(
                "hysteresis_enter_multiplier ({}) must exceed hysteresis_exit_multiplier ({})",
                self.hysteresis_enter_multiplier,
                self.hysteresis_exit_multiplier
            );
        }
        Ok(())
    }
}

impl RecognitionConfig {
    /// (enter, exit) thresholds for a base threshold
    pub fn hysteresis_band(&self, base: f32) -> (f32, f32) {
        (
            base * self.hysteresis_enter_multiplier,
            base * self.hysteresis_exit_multiplier,
        )
    }

    /// Cooldown between triggers; zero when the value is negative or not finite
    pub fn cooldown(&self) -> Duration {
        Duration::try_from_secs_f32(self.cooldown_time).unwrap_or(Duration::ZERO)
    }

    /// Required fist hold; zero when the value is negative or not finite
    pub fn hold_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.fist_hold_time).unwrap_or(Duration::ZERO)
    }
}

/// Landmark source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Read world-space landmarks (meters) instead of image-space ones
    pub use_world_coordinates: bool,
    /// Minimum visibility for a landmark to count as valid
    pub visibility_threshold: f32,
    /// Which detected skeleton to track
    pub pose_index: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            use_world_coordinates: true,
            visibility_threshold: 0.5,
            pose_index: 0,
        }
    }
}

impl ConfigValidation for SourceConfig {
    fn validate(&self) -> Result<()> {
        check_range("visibility_threshold", self.visibility_threshold, 0.0, 1.0)
    }
}

/// Automatic calibration schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Calibrate automatically once the session starts
    pub auto_calibrate: bool,
    /// Seconds after the first tick before the first attempt
    pub calibration_delay_secs: f32,
    /// Seconds between attempts after a failure
    pub calibration_retry_secs: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_calibrate: true,
            calibration_delay_secs: 2.0,
            calibration_retry_secs: 1.0,
        }
    }
}

impl ConfigValidation for SessionConfig {
    fn validate(&self) -> Result<()> {
        check_range("calibration_delay_secs", self.calibration_delay_secs, 0.0, 60.0)?;
        check_range("calibration_retry_secs", self.calibration_retry_secs, 0.05, 60.0)?;
        Ok(())
    }
}

impl SessionConfig {
    pub fn calibration_delay(&self) -> Duration {
        Duration::try_from_secs_f32(self.calibration_delay_secs).unwrap_or(Duration::ZERO)
    }

    pub fn calibration_retry(&self) -> Duration {
        Duration::try_from_secs_f32(self.calibration_retry_secs).unwrap_or(Duration::ZERO)
    }
}
