//! Render configuration and the on-disk scene file format.
//!
//! Every field has a default, so an empty `render` block (or none at all)
//! reproduces the stock 500x500, 40 degree, single-light render.

use std::path::Path;

use orb_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scene::{SceneDesc, SceneError};

/// Errors from loading or validating a render configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Image size must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Field of view must be within (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("Shading weight {name} must be finite, got {value}")]
    InvalidWeight { name: &'static str, value: f32 },

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Fixed parameters of a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Field of view in degrees
    pub fov: f32,
    /// Eye position; the camera always looks down -Z
    pub eye: Vec3,
    /// Weight of the light-dependent term
    pub ambient: f32,
    /// Weight of the constant per-light term
    pub diffuse: f32,
    /// Weight of the reflection highlight
    pub specular: f32,
    /// Distance secondary rays start above the surface, along the normal.
    /// Numerical workaround against self-intersection, not a physical value.
    pub surface_bias: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            fov: 40.0,
            eye: Vec3::ZERO,
            ambient: 0.6,
            diffuse: 0.4,
            specular: 0.1,
            surface_bias: 1.0,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the ambient/diffuse/specular weights.
    pub fn with_weights(mut self, ambient: f32, diffuse: f32, specular: f32) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyImage {
                width: self.width,
                height: self.height,
            });
        }

        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ConfigError::InvalidFov(self.fov));
        }

        for (name, value) in [
            ("ambient", self.ambient),
            ("diffuse", self.diffuse),
            ("specular", self.specular),
            ("surface_bias", self.surface_bias),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }

        Ok(())
    }
}

/// A scene file: optional render settings plus the sphere list.
///
/// ```json
/// {
///   "render": { "width": 500, "height": 500 },
///   "spheres": [ { "center": [0, -1, -10], "radius": 1, "surface_color": [0.4, 0.7, 0.9] } ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(flatten)]
    pub scene: SceneDesc,
}

impl SceneFile {
    /// The built-in golf scene with default settings.
    pub fn golf() -> Self {
        Self {
            render: RenderConfig::default(),
            scene: SceneDesc::golf(),
        }
    }

    /// Parse and validate a scene file from JSON.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let file: Self = serde_json::from_str(json)?;
        file.render.validate()?;
        file.scene.validate()?;
        Ok(file)
    }

    /// Load and validate a scene file from disk.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let file = Self::from_json_str(&json)?;

        log::debug!(
            "Loaded {}: {}x{} @ {} deg, {} spheres ({} lights)",
            path.display(),
            file.render.width,
            file.render.height,
            file.render.fov,
            file.scene.len(),
            file.scene.light_count()
        );

        Ok(file)
    }
}
