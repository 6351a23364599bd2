//! Render configuration
//!
//! Loaded from `.toml` or `.ron` by extension. Every section has defaults, so
//! a file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::animation::AnimationStep;
use crate::camera::{DEFAULT_NEAR_PLANE, DEFAULT_STEP};
use crate::context::DEFAULT_MAX_RETRIES;
use crate::light::DEFAULT_AMBIENT;
use crate::math::Vec3;
use crate::viewport::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub yaw_degrees: f32,
    /// Near-plane distance D.
    pub near_plane: f32,
    /// Distance moved per key press.
    pub step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw_degrees: 0.0,
            near_plane: DEFAULT_NEAR_PLANE,
            step: DEFAULT_STEP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub direction: Vec3,
    pub ambient: f32,
    pub diffuse: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.3, -0.4, 1.0),
            ambient: DEFAULT_AMBIENT,
            diffuse: 1.0 - DEFAULT_AMBIENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Distance to the projection plane.
    pub distance: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            viewport_width: DEFAULT_WIDTH as f32 / DEFAULT_HEIGHT as f32,
            viewport_height: 1.0,
            distance: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Frame restarts allowed before `render()` fails.
    pub max_retries: u32,
    /// Apply each scene's animation step while composing its matrix.
    pub animate: bool,
    /// Step given to scenes the driver builds.
    pub animation: AnimationStep,
    /// Base color of driver-built models.
    pub color: [u8; 3],
    /// Distance from the camera to driver-built models.
    pub model_distance: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            animate: false,
            animation: AnimationStep::spin(Vec3::new(0.01, 0.02, 0.0)),
            color: crate::colors::DEFAULT_BASE_COLOR,
            model_distance: 6.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub viewport: ViewportConfig,
    pub render: PipelineConfig,
}

impl RenderConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        config.validate()?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Rejects values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive finite number, got {value}"),
                })
            }
        }

        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Invalid {
                field: "viewport.width/height",
                reason: format!("raster must not be empty, got {}x{}", self.viewport.width, self.viewport.height),
            });
        }
        positive("viewport.viewport_width", self.viewport.viewport_width)?;
        positive("viewport.viewport_height", self.viewport.viewport_height)?;
        positive("viewport.distance", self.viewport.distance)?;
        // The near plane may be zero, but never infinite or negative.
        if !(self.camera.near_plane.is_finite() && self.camera.near_plane >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "camera.near_plane",
                reason: format!("must be finite and non-negative, got {}", self.camera.near_plane),
            });
        }
        positive("camera.step", self.camera.step)?;
        if self.light.direction.try_normalize().is_none() {
            return Err(ConfigError::Invalid {
                field: "light.direction",
                reason: "must not be the zero vector".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("rastery-{}-{}", std::process::id(), name))
    }

    #[test]
    fn defaults_are_valid() {
        RenderConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: RenderConfig = toml::from_str(
            r#"
            [camera]
            near_plane = 3.0

            [viewport]
            width = 320
            height = 200
            "#,
        )
        .unwrap();

        assert_eq!(config.camera.near_plane, 3.0);
        assert_eq!(config.viewport.width, 320);
        assert_eq!(config.camera.step, DEFAULT_STEP);
        assert_eq!(config.render.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn ron_file_loads() {
        let path = temp_path("config.ron");
        std::fs::write(&path, "(render: (max_retries: 3, animate: true))").unwrap();

        let config = RenderConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.render.max_retries, 3);
        assert!(config.render.animate);
    }

    #[test]
    fn saved_toml_loads_back() {
        let path = temp_path("saved.toml");
        let mut config = RenderConfig::default();
        config.camera.position = Vec3::new(1.0, 2.0, -4.0);

        config.save(&path).unwrap();
        let loaded = RenderConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.camera.position, config.camera.position);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = temp_path("config.yaml");
        std::fs::write(&path, "").unwrap();
        let result = RenderConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn infinite_near_plane_is_invalid() {
        let mut config = RenderConfig::default();
        config.camera.near_plane = f32::INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "camera.near_plane", .. })
        ));
    }

    #[test]
    fn empty_raster_is_invalid() {
        let mut config = RenderConfig::default();
        config.viewport.height = 0;
        assert!(config.validate().is_err());
    }
}
