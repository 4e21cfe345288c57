//! Scene and transformer configuration.
//!
//! Every field has a default, so a configuration file only needs to name the
//! values it overrides.

use radial_core::{Color, ConfigError, Padding};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::transformer::{AnchorPosition, SidePosition};

/// Scene behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Minimum interval between two drag position updates, in milliseconds
    pub drag_throttle_ms: u64,
    /// Tolerance of the triangle hit test
    pub hit_epsilon: f64,
    /// Fill painted over the whole surface before each repaint
    pub background: Option<Color>,
    /// Run the collision sweep before each repaint
    pub collision_sweep: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            drag_throttle_ms: 16,
            hit_epsilon: 0.1,
            background: None,
            collision_sweep: true,
        }
    }
}

impl SceneConfig {
    pub fn drag_throttle(&self) -> Duration {
        Duration::from_millis(self.drag_throttle_ms)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> radial_core::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hit_epsilon.is_finite() || self.hit_epsilon < 0.0 {
            return Err(invalid("hit_epsilon", "must be a finite value >= 0"));
        }
        Ok(())
    }
}

/// Selection overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerConfig {
    /// Anchor fill
    pub color: Color,
    /// Selection border stroke
    pub border_color: Color,
    pub border_width: f64,
    /// Anchor diameter
    pub size: f64,
    /// Smallest width/height a resize may produce; defaults to `size`
    pub min_size: Option<f64>,
    pub anchors_enabled: Vec<AnchorPosition>,
    pub sides_enabled: Vec<SidePosition>,
    /// Side bar fill
    pub side_color: Color,
    /// Space between the targets' union and the selection border
    pub padding: Padding,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x1e, 0x90, 0xff),
            border_color: Color::rgb(0x1e, 0x90, 0xff),
            border_width: 2.0,
            size: 10.0,
            min_size: None,
            anchors_enabled: AnchorPosition::ALL.to_vec(),
            sides_enabled: SidePosition::ALL.to_vec(),
            side_color: Color::rgba(0x1e, 0x90, 0xff, 0.3),
            padding: Padding::uniform(5.0),
        }
    }
}

impl TransformerConfig {
    pub fn min_size(&self) -> f64 {
        self.min_size.unwrap_or(self.size)
    }

    /// Side bars are as thick as an anchor plus the border stroke.
    pub fn side_thickness(&self) -> f64 {
        self.size + self.border_width
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(invalid("size", "must be > 0"));
        }
        if !(self.border_width.is_finite() && self.border_width >= 0.0) {
            return Err(invalid("border_width", "must be >= 0"));
        }
        if let Some(min) = self.min_size {
            if !(min.is_finite() && min >= 0.0) {
                return Err(invalid("min_size", "must be >= 0"));
            }
        }
        Ok(())
    }
}

/// Complete configuration file: one section per component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialConfig {
    pub scene: SceneConfig,
    pub transformer: TransformerConfig,
}

impl RadialConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.scene.validate()?;
        config.transformer.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> radial_core::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
