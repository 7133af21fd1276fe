use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Errors from loading or validating a scene configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Runtime configuration for the scene and its window.
///
/// Every field has a default; a YAML file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for scene construction.
    pub seed: u64,
    /// How long the loading cover is shown, in milliseconds.
    pub loading_delay_ms: u64,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera distance from the origin along +Z.
    pub camera_distance: f32,
    /// Fraction of orbit velocity removed per frame.
    pub orbit_damping: f32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            loading_delay_ms: 3000,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 50.0,
            orbit_damping: 0.05,
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl SceneConfig {
    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading_delay_ms)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text)?;
        tracing::info!(path = %path.display(), seed = config.seed, "loaded scene config");
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid {
                field: "fov_degrees",
                reason: "must be between 0 and 180 exclusive",
            });
        }
        if !(self.near > 0.0) {
            return Err(ConfigError::Invalid {
                field: "near",
                reason: "must be positive",
            });
        }
        if !(self.far > self.near) {
            return Err(ConfigError::Invalid {
                field: "far",
                reason: "must be greater than near",
            });
        }
        if !(self.camera_distance > 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera_distance",
                reason: "must be positive",
            });
        }
        if !(0.0..=1.0).contains(&self.orbit_damping) {
            return Err(ConfigError::Invalid {
                field: "orbit_damping",
                reason: "must be within [0, 1]",
            });
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::Invalid {
                field: "window_width/window_height",
                reason: "must be non-zero",
            });
        }
        Ok(())
    }
}
