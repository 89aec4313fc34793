/// rast3d Core Library - Transform construction for the software pipeline
///
/// This library provides the stateless core functionality: model, view and
/// projection matrices, mesh loading, and render configuration. Every builder
/// is a pure function of its arguments and is recomputed once per frame.

pub mod angle;
pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod stl;
pub mod transform;

// Re-export commonly used types
pub use config::RenderConfig;
pub use error::{ConfigError, StlError, TransformError};
pub use geometry::Mesh;
pub use projection::{perspective, view_matrix, Camera};
pub use transform::{rotation_about_axis, rotation_z, RotationMode, Transform};
