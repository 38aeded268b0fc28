use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Settings shared by every ring of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Stroke width of each ring.
    pub thickness: f64,
    /// Radius left empty in the middle.
    pub inner_radius: f64,
    /// Gap between neighbouring strokes.
    pub ring_spacing: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thickness: 20.0,
            inner_radius: 40.0,
            ring_spacing: 20.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.thickness.is_finite() || self.thickness <= 0.0 {
            return Err(ConfigurationError::NonPositiveThickness(self.thickness));
        }
        for (field, value) in [
            ("inner_radius", self.inner_radius),
            ("ring_spacing", self.ring_spacing),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ConfigurationError::NegativeLength { field, value });
            }
        }
        Ok(())
    }
}
