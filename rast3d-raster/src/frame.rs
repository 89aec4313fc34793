/// Conversion of the floating-point frame buffer to 8-bit images
use std::path::Path;

use image::{Rgb, RgbImage};
use nalgebra::Vector3;

use crate::error::RasterError;
use crate::rasterizer::Rasterizer;

/// Saturating cast of a 0-255 float channel.
#[inline]
fn to_u8(channel: f32) -> u8 {
    // `as` saturates and maps NaN to 0
    channel.round() as u8
}

pub fn to_rgb(color: &Vector3<f32>) -> [u8; 3] {
    [to_u8(color.x), to_u8(color.y), to_u8(color.z)]
}

/// Build an 8-bit RGB image from a row-major, top-down frame buffer.
pub fn to_rgb_image(frame: &[Vector3<f32>], width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let idx = y as usize * width as usize + x as usize;
        Rgb(frame.get(idx).map(to_rgb).unwrap_or_default())
    })
}

impl Rasterizer {
    pub fn to_rgb_image(&self) -> RgbImage {
        to_rgb_image(
            self.frame_buffer(),
            self.width() as u32,
            self.height() as u32,
        )
    }

    /// Write the current frame; the format follows the file extension.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RasterError> {
        let path = path.as_ref();
        self.to_rgb_image().save(path)?;
        log::info!("Wrote {}x{} image to {}", self.width(), self.height(), path.display());
        Ok(())
    }
}
