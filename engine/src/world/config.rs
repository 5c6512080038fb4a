//! Sandbox Configuration
//!
//! Every tunable of the sandbox in one serde struct. Missing fields fall
//! back to the stock values, so a config file only lists what it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::CameraSettings;
use crate::vehicles::{AerialTuning, EngineParameters, GroundTuning, StabilizerTuning};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Central configuration for the sandbox.
///
/// `Default` returns the stock handling of both vehicles and the camera.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    pub engine: EngineParameters,
    pub aerial: AerialTuning,
    pub ground: GroundTuning,
    pub stabilizer: StabilizerTuning,
    pub camera: CameraSettings,
}

impl SandboxConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SandboxConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!("loaded sandbox config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the per-tick code would otherwise silently clamp.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let power = self.engine.engine_power();
        if !(0.0..=1.0).contains(&power) {
            return Err(ConfigError::InvalidValue(format!(
                "engine_power must be in [0, 1], got {power}"
            )));
        }

        let factors = [
            ("aerial.angular_damping", self.aerial.angular_damping),
            ("engine.friction_factor", self.engine.friction_factor),
            ("stabilizer.slerp_factor", self.stabilizer.slerp_factor),
            ("camera.radius_lerp", self.camera.radius_lerp),
            ("camera.look_lerp", self.camera.look_lerp),
            ("camera.velocity_lerp", self.camera.velocity_lerp),
            ("camera.chase_lerp", self.camera.chase_lerp),
        ];
        for (name, value) in factors {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        let sensitivity = self.camera.sensitivity;
        if !(sensitivity.x > 0.0 && sensitivity.y > 0.0) || !sensitivity.is_finite() {
            return Err(ConfigError::InvalidValue(format!(
                "camera.sensitivity must be positive, got {sensitivity}"
            )));
        }

        Ok(())
    }
}
