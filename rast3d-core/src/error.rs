/// Error types for the core library
use thiserror::Error;

/// Failure building a model, view or projection matrix.
///
/// Transform builders only fail on inputs that would otherwise divide by
/// zero; everything else (negative aspect, fov outside (0, 180)) is checked
/// by [`RenderConfig::validate`](crate::config::RenderConfig::validate).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Rotation axis is all zero or has a non-finite component.
    #[error("invalid rotation axis ({x}, {y}, {z}): components must be finite and not all zero")]
    InvalidAxis { x: f32, y: f32, z: f32 },

    /// Near and far planes coincide, so depth cannot be remapped.
    #[error("invalid clip range: z_near ({z_near}) and z_far ({z_far}) must differ")]
    InvalidClipRange { z_near: f32, z_far: f32 },
}

/// Failure reading an STL mesh.
#[derive(Error, Debug)]
pub enum StlError {
    #[error("file too small to be a valid STL ({0} bytes)")]
    TooSmall(usize),

    #[error("unexpected end of file in facet {facet}")]
    Truncated { facet: usize },

    #[error("failed to parse ASCII STL: {0}")]
    Ascii(String),

    #[error("failed to read STL file")]
    Io(#[from] std::io::Error),
}

/// Invalid or unreadable render configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config value for `{field}`: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
