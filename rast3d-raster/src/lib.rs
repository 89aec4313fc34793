/// rast3d Raster - Software rasterizer driven by model/view/projection matrices
///
/// Geometry is loaded once into handle-addressed buffers; every frame the
/// caller sets the three transforms and calls `draw`, which fills an owned
/// floating-point RGB frame buffer.

pub mod error;
pub mod frame;
pub mod rasterizer;

pub use error::RasterError;
pub use rasterizer::{Buffers, IndBufId, PosBufId, Primitive, Rasterizer};
