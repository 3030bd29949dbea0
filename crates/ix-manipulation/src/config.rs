//! Manipulation configuration
//!
//! Settings can be built in code or loaded from a RON file.

use std::path::Path;

use glam::Vec3;
use ix_core::OneEuroConfig;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAXIMUM_SCALE_FACTOR, DEFAULT_MINIMUM_SCALE_FACTOR, DEFAULT_Z_STRETCH_FACTOR_MAX,
    DEFAULT_Z_STRETCH_FACTOR_MIN,
};

/// Axis rotation is restricted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationAxis {
    #[default]
    All,
    X,
    Y,
    Z,
}

impl RotationAxis {
    /// World axis for a constrained mode, `None` for `All`
    pub fn axis(self) -> Option<Vec3> {
        match self {
            RotationAxis::All => None,
            RotationAxis::X => Some(Vec3::X),
            RotationAxis::Y => Some(Vec3::Y),
            RotationAxis::Z => Some(Vec3::Z),
        }
    }
}

/// Manipulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManipulationConfig {
    pub enable_translation: bool,
    pub enable_rotation: bool,
    /// Two-handed scaling
    pub enable_scale: bool,
    pub enable_x_translation: bool,
    pub enable_y_translation: bool,
    pub enable_z_translation: bool,
    pub rotation_axis: RotationAxis,
    /// Smallest allowed scale, relative to the original local scale
    pub minimum_scale_factor: f32,
    /// Largest allowed scale, relative to the original local scale
    pub maximum_scale_factor: f32,
    /// Amplify depth motion during ray manipulation
    pub enable_stretch_z: bool,
    pub z_stretch_factor_min: f32,
    pub z_stretch_factor_max: f32,
    pub use_filter: bool,
    pub filter: OneEuroConfig,
}

impl Default for ManipulationConfig {
    fn default() -> Self {
        Self {
            enable_translation: true,
            enable_rotation: true,
            enable_scale: true,
            enable_x_translation: true,
            enable_y_translation: true,
            enable_z_translation: true,
            rotation_axis: RotationAxis::All,
            minimum_scale_factor: DEFAULT_MINIMUM_SCALE_FACTOR,
            maximum_scale_factor: DEFAULT_MAXIMUM_SCALE_FACTOR,
            enable_stretch_z: true,
            z_stretch_factor_min: DEFAULT_Z_STRETCH_FACTOR_MIN,
            z_stretch_factor_max: DEFAULT_Z_STRETCH_FACTOR_MAX,
            use_filter: true,
            filter: OneEuroConfig::default(),
        }
    }
}

impl ManipulationConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.minimum_scale_factor,
            self.maximum_scale_factor,
            self.z_stretch_factor_min,
            self.z_stretch_factor_max,
            self.filter.min_cutoff,
            self.filter.beta,
            self.filter.dcutoff,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid("values must be finite".into()));
        }
        if self.minimum_scale_factor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "minimum_scale_factor must be positive, got {}",
                self.minimum_scale_factor
            )));
        }
        if self.maximum_scale_factor < self.minimum_scale_factor {
            return Err(ConfigError::Invalid(format!(
                "maximum_scale_factor {} is below minimum_scale_factor {}",
                self.maximum_scale_factor, self.minimum_scale_factor
            )));
        }
        if self.z_stretch_factor_min < 0.0 || self.z_stretch_factor_max < self.z_stretch_factor_min
        {
            return Err(ConfigError::Invalid(format!(
                "z stretch range [{}, {}] is invalid",
                self.z_stretch_factor_min, self.z_stretch_factor_max
            )));
        }
        if self.filter.min_cutoff <= 0.0 || self.filter.dcutoff <= 0.0 || self.filter.beta < 0.0 {
            return Err(ConfigError::Invalid(
                "filter cutoffs must be positive and beta non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a RON document
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: ManipulationConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save configuration to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
