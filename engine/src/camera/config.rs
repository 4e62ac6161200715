//! Camera Configuration
//!
//! Structured, defaulted option sets for the orbit controller and the track
//! animation overlay. Both load from JSON with camelCase keys; missing keys
//! take their defaults.

use std::path::Path;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Options recognised by [`OrbitController`](super::OrbitController).
///
/// Ranges are not enforced at construction. Call [`OrbitConfig::validate`]
/// to check them; controllers built from an invalid config log a warning and
/// behave unpredictably (e.g. `min_zoom > max_zoom`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrbitConfig {
    /// Lowest pitch in degrees
    pub min_angle: f32,
    /// Highest pitch in degrees
    pub max_angle: f32,
    /// Closest orbit distance
    pub min_zoom: f32,
    /// Farthest orbit distance
    pub max_zoom: f32,
    pub orbit_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    /// Per-frame smoothing factor in (0, 1]; 1 snaps immediately
    pub dampening: f32,
    pub enable_keyboard_controls: bool,
    /// Starting yaw in radians
    pub initial_alpha: f32,
    /// Starting pitch in radians
    pub initial_beta: f32,
    pub initial_radius: f32,
    pub initial_target: Vec3,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            min_angle: -90.0,
            max_angle: 90.0,
            min_zoom: 0.1,
            max_zoom: 30.0,
            orbit_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            dampening: 0.12,
            enable_keyboard_controls: true,
            initial_alpha: 0.5,
            initial_beta: 0.5,
            initial_radius: 5.0,
            initial_target: Vec3::ZERO,
        }
    }
}

impl OrbitConfig {
    /// Check ranges that the controller relies on.
    pub fn validate(&self) -> Result<()> {
        if !(self.min_zoom < self.max_zoom) {
            return Err(ConfigError::InvalidZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if !(self.min_angle <= self.max_angle) {
            return Err(ConfigError::InvalidAngleRange {
                min: self.min_angle,
                max: self.max_angle,
            });
        }
        if !(self.dampening > 0.0 && self.dampening <= 1.0) {
            return Err(ConfigError::InvalidDampening(self.dampening));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Options for [`TrackAnimation`](super::TrackAnimation).
///
/// Times are milliseconds, matching the JSON representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackSettings {
    /// Period between animation logic ticks
    pub animation_logic_interval: u64,
    /// Desired radius seeded on start
    pub initial_radius: Option<f32>,
    /// Look-at target seeded on start and restored on resume
    pub initial_target: Option<Vec3>,
    pub should_pause_animation_on_input: bool,
    /// Quiet period after input before the animation resumes
    pub pause_period_on_input: u64,
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            animation_logic_interval: 16,
            initial_radius: None,
            initial_target: None,
            should_pause_animation_on_input: true,
            pause_period_on_input: 3000,
        }
    }
}

impl TrackSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.animation_logic_interval)
    }

    pub fn pause_period(&self) -> Duration {
        Duration::from_millis(self.pause_period_on_input)
    }

    pub fn validate(&self) -> Result<()> {
        if self.animation_logic_interval == 0 {
            return Err(ConfigError::InvalidInterval);
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
