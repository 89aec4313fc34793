/// Render configuration loaded from TOML
use std::path::Path;

use nalgebra::Vector3;
use serde::Deserialize;

use crate::angle::{DEFAULT_ASPECT, DEFAULT_FOV_DEG, DEFAULT_Z_FAR, DEFAULT_Z_NEAR};
use crate::error::ConfigError;
use crate::projection::Camera;
use crate::transform::RotationMode;

pub const DEFAULT_WIDTH: u32 = 700;
pub const DEFAULT_HEIGHT: u32 = 700;

/// Scene and output settings.
///
/// Every field has a default, so an empty file (or no file at all) renders
/// the stock scene: a 700x700 frame, eye at (0, 0, 5), 45 degree vertical
/// field of view, clip planes at 0.1 and 50, rotation about +Z.
///
/// ```toml
/// width = 700
/// height = 700
/// eye = [0.0, 0.0, 5.0]
/// fov_deg = 45.0
/// rotation_axis = [1.0, 1.0, 0.0]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub eye: [f32; 3],
    pub fov_deg: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// When set, rotate about this axis instead of +Z.
    pub rotation_axis: Option<[f32; 3]>,
    /// Fill triangles instead of drawing their outlines.
    pub fill: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            eye: [0.0, 0.0, 5.0],
            fov_deg: DEFAULT_FOV_DEG,
            aspect: DEFAULT_ASPECT,
            z_near: DEFAULT_Z_NEAR,
            z_far: DEFAULT_Z_FAR,
            rotation_axis: None,
            fill: false,
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Check the ranges the transform builders leave to the caller.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::invalid(
                "width/height",
                format!("frame must be non-empty, got {}x{}", self.width, self.height),
            ));
        }
        if !(self.fov_deg > 0.0 && self.fov_deg < 180.0) {
            return Err(ConfigError::invalid(
                "fov_deg",
                format!("must be in (0, 180), got {}", self.fov_deg),
            ));
        }
        if !(self.aspect > 0.0 && self.aspect.is_finite()) {
            return Err(ConfigError::invalid(
                "aspect",
                format!("must be positive, got {}", self.aspect),
            ));
        }
        if !(self.z_near > 0.0) {
            return Err(ConfigError::invalid(
                "z_near",
                format!("must be positive, got {}", self.z_near),
            ));
        }
        if !(self.z_far > self.z_near && self.z_far.is_finite()) {
            return Err(ConfigError::invalid(
                "z_far",
                format!("must be greater than z_near ({}), got {}", self.z_near, self.z_far),
            ));
        }
        if self.eye.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::invalid("eye", "components must be finite"));
        }
        Ok(())
    }

    pub fn camera(&self) -> Camera {
        Camera {
            eye: Vector3::from(self.eye),
            fov_deg: self.fov_deg,
            aspect: self.aspect,
            z_near: self.z_near,
            z_far: self.z_far,
        }
    }

    pub fn rotation_mode(&self) -> RotationMode {
        match self.rotation_axis {
            Some(axis) => RotationMode::ArbitraryAxis(Vector3::from(axis)),
            None => RotationMode::SingleAxisZ,
        }
    }
}
