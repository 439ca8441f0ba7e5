//! Sound system configuration

use crate::error::{Result, SoundError};
use serde::{Deserialize, Serialize};

/// How a body's proximity radius is derived when no explicit radius is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusMode {
    /// Mean distance from the centre to the outline vertices
    #[default]
    AverageVertexDistance,
    /// Distance from the centre to the farthest outline vertex
    MaxVertexDistance,
}

/// Sound system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    /// Default radius derivation
    pub radius_mode: RadiusMode,

    /// Radius used for bodies with neither an explicit radius nor an outline
    pub fallback_radius: f32,

    /// Emit a warning when a hook is skipped for lack of a chain node
    pub log_missing_nodes: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            radius_mode: RadiusMode::AverageVertexDistance,
            fallback_radius: 0.0,
            log_missing_nodes: true,
        }
    }
}

impl SoundSettings {
    /// Settings that size every body by its farthest vertex
    pub fn outer_radius() -> Self {
        Self {
            radius_mode: RadiusMode::MaxVertexDistance,
            ..Default::default()
        }
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the settings for unusable values
    pub fn validate(&self) -> Result<()> {
        if !self.fallback_radius.is_finite() || self.fallback_radius < 0.0 {
            return Err(SoundError::InvalidConfig(format!(
                "fallback_radius must be a non-negative finite number, got {}",
                self.fallback_radius
            )));
        }
        Ok(())
    }

    /// Set radius mode
    pub fn with_radius_mode(mut self, mode: RadiusMode) -> Self {
        self.radius_mode = mode;
        self
    }

    /// Set fallback radius
    pub fn with_fallback_radius(mut self, radius: f32) -> Self {
        self.fallback_radius = radius;
        self
    }

    /// Silence missing-node warnings
    pub fn quiet(mut self) -> Self {
        self.log_missing_nodes = false;
        self
    }
}
