//! Editor configuration.
//!
//! Every field has a default so partial JSON files are accepted.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Thresholds used by edge snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Absolute tolerance when comparing edge lengths (world units).
    pub length_tolerance: f64,
    /// Maximum midpoint distance, as a fraction of the grid size.
    pub distance_ratio: f64,
    /// Maximum angular error in radians for a candidate to be accepted.
    pub angle_tolerance: f64,
    /// Outward seam offset, as a fraction of the grid size.
    pub outward_offset_ratio: f64,
    /// Raw angle window (as multiples of π) that marks a triangle pair as flush.
    pub hexagon_window: (f64, f64),
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            length_tolerance: 0.1,
            distance_ratio: 0.3,
            angle_tolerance: 0.3,
            outward_offset_ratio: 0.05,
            hexagon_window: (0.8, 1.2),
        }
    }
}

/// Top-level editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// The viewport height is divided into this many grid cells.
    pub grid_divisions: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Additive zoom change per wheel notch or button press.
    pub zoom_step: f64,
    /// Rotation per key press or wheel notch, in radians.
    pub rotation_step: f64,
    /// Maximum number of undo snapshots kept.
    pub history_limit: usize,
    pub snap: SnapSettings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_divisions: 20.0,
            min_zoom: 0.5,
            max_zoom: 3.0,
            zoom_step: 0.1,
            rotation_step: PI / 12.0,
            history_limit: 30,
            snap: SnapSettings::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default editor config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_divisions <= 0.0 {
            return Err(ConfigError::Invalid("grid_divisions must be > 0".into()));
        }
        if self.min_zoom <= 0.0 || self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid(
                "zoom range must satisfy 0 < min_zoom <= max_zoom".into(),
            ));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be > 0".into()));
        }
        let (lo, hi) = self.snap.hexagon_window;
        if lo > hi {
            return Err(ConfigError::Invalid("hexagon_window is inverted".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history_limit, 30);
        assert!((config.snap.distance_ratio - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{"history_limit": 5, "snap": {"angle_tolerance": 0.2}}"#)
            .unwrap();
        assert_eq!(config.history_limit, 5);
        assert!((config.snap.angle_tolerance - 0.2).abs() < f64::EPSILON);
        assert!((config.snap.length_tolerance - 0.1).abs() < f64::EPSILON);
        assert!((config.max_zoom - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_zoom_range() {
        let result = EditorConfig::from_json(r#"{"min_zoom": 4.0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load_or_default(&dir.path().join("missing.json"));
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.json");
        std::fs::write(&path, r#"{"grid_divisions": 10}"#).unwrap();
        let config = EditorConfig::load_from_file(&path).unwrap();
        assert!((config.grid_divisions - 10.0).abs() < f64::EPSILON);
    }
}
