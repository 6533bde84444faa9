//! Rig Configuration
//!
//! JSON description of a play session: movement and camera tuning, the slide
//! recipe and where things start. Every section is optional; missing fields fall
//! back to their defaults.
//!
//! ```json
//! {
//!   "movement": { "move_speed": 4.0 },
//!   "camera": { "min_distance": 3.0 },
//!   "slide": { "angle": 720.0 }
//! }
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::CameraTuning;
use crate::physics::motor::MAX_STABLE_SLOPE_ANGLE;
use crate::player::MovementTuning;
use crate::world::SlideSettings;

/// Default fixed simulation step (60 Hz).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Errors that can occur while loading a [`RigConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the file failed.
    Io(std::io::Error),
    /// The file is not valid JSON for this schema.
    Json(serde_json::Error),
    /// Parsed, but a value is out of range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Full session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub movement: MovementTuning,
    pub camera: CameraTuning,
    pub slide: SlideSettings,
    /// World position of the slide generator
    pub slide_origin: Vec3,
    pub spawn_position: Vec3,
    /// Steepest walkable ground in degrees
    pub max_stable_slope_angle: f32,
    /// Camera degrees per raw mouse count
    pub mouse_sensitivity: f32,
    /// Seconds per simulation tick
    pub time_step: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            movement: MovementTuning::default(),
            camera: CameraTuning::default(),
            slide: SlideSettings::default(),
            slide_origin: Vec3::ZERO,
            spawn_position: Vec3::ZERO,
            max_stable_slope_angle: MAX_STABLE_SLOPE_ANGLE,
            mouse_sensitivity: crate::input::MOUSE_SENSITIVITY,
            time_step: DEFAULT_TIME_STEP,
        }
    }
}

impl RigConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: RigConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        log::info!("loaded rig config from {}", path.display());
        Ok(config)
    }

    /// Write as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(problem) = self.slide.problem() {
            return Err(ConfigError::Invalid(format!("slide: {problem}")));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        let camera = &self.camera;
        if camera.min_distance > camera.max_distance {
            return Err(ConfigError::Invalid(format!(
                "camera.min_distance {} exceeds camera.max_distance {}",
                camera.min_distance, camera.max_distance
            )));
        }
        if camera.min_vertical_angle > camera.max_vertical_angle {
            return Err(ConfigError::Invalid(format!(
                "camera.min_vertical_angle {} exceeds camera.max_vertical_angle {}",
                camera.min_vertical_angle, camera.max_vertical_angle
            )));
        }
        if camera.smoothing_margin <= 0.0 {
            return Err(ConfigError::Invalid("camera.smoothing_margin must be positive".into()));
        }
        if self.movement.drag < 0.0 {
            return Err(ConfigError::Invalid("movement.drag must not be negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = RigConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RigConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = RigConfig::from_json_str(
            r#"{ "movement": { "move_speed": 4.5 }, "camera": { "invert_y": true } }"#,
        )
        .unwrap();
        assert_eq!(config.movement.move_speed, 4.5);
        assert_eq!(config.movement.air_speed, MovementTuning::default().air_speed);
        assert!(config.camera.invert_y);
        assert_eq!(config.camera.max_distance, 10.0);
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let err = RigConfig::from_json_str(r#"{ "slide": { "angle_interval": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("angle_interval"));
    }

    #[test]
    fn test_runaway_slide_rejected() {
        let json = r#"{ "slide": { "angle": 1e30, "angle_interval": 1e-30 } }"#;
        let err = RigConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("segments"));
    }

    #[test]
    fn test_inverted_distance_bounds_rejected() {
        let err = RigConfig::from_json_str(r#"{ "camera": { "min_distance": 12.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json() {
        match RigConfig::from_json_str("{ movement: ") {
            Err(ConfigError::Json(_)) => {}
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        match RigConfig::load(Path::new("/nonexistent/slidewalk/rig.json")) {
            Err(ConfigError::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("slidewalk_rig_{}.json", std::process::id()));
        let mut config = RigConfig::default();
        config.spawn_position = Vec3::new(1.0, 2.0, 3.0);
        config.slide.angle = 180.0;
        config.save(&path).unwrap();

        let loaded = RigConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
