/// Presents a rasterized frame buffer as colored ASCII cells
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Vector3;
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Downsamples a frame buffer onto a terminal grid
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            char_buffer: vec![' '; cols * rows],
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        if (cols, rows) != (self.cols, self.rows) {
            *self = Self::new(cols, rows);
        }
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.char_buffer[row * self.cols + col])
    }

    /// Map a top-down `width` x `height` frame onto the grid. Each cell
    /// shows the brightest pixel of its block so one-pixel lines survive.
    pub fn rasterize_frame(&mut self, frame: &[Vector3<f32>], width: usize, height: usize) {
        self.char_buffer.fill(' ');
        if width == 0 || height == 0 {
            return;
        }

        for row in 0..self.rows {
            let y0 = row * height / self.rows;
            let y1 = ((row + 1) * height / self.rows).max(y0 + 1).min(height);
            for col in 0..self.cols {
                let x0 = col * width / self.cols;
                let x1 = ((col + 1) * width / self.cols).max(x0 + 1).min(width);

                let mut brightness = 0.0f32;
                for y in y0..y1 {
                    for color in &frame[y * width + x0..y * width + x1] {
                        brightness = brightness.max(luminance(color));
                    }
                }
                self.char_buffer[row * self.cols + col] = ramp_char(brightness);
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.char_buffer.chunks(self.cols.max(1)) {
            for &c in row {
                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Relative luminance of a 0-255 color, in 0..=1
fn luminance(color: &Vector3<f32>) -> f32 {
    ((0.2126 * color.x + 0.7152 * color.y + 0.0722 * color.z) / 255.0).clamp(0.0, 1.0)
}

fn ramp_char(brightness: f32) -> char {
    let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_ends() {
        assert_eq!(ramp_char(0.0), ' ');
        assert_eq!(ramp_char(1.0), '@');
        assert_eq!(ramp_char(2.0), '@');
    }

    #[test]
    fn test_single_pixel_survives_downsampling() {
        let (width, height) = (100, 100);
        let mut frame = vec![Vector3::zeros(); width * height];
        // Top-down row 73, column 42
        frame[73 * width + 42] = Vector3::new(255.0, 255.0, 255.0);

        let mut renderer = AsciiRenderer::new(10, 10);
        renderer.rasterize_frame(&frame, width, height);

        assert_eq!(renderer.cell(4, 7), Some('@'));
        let lit = renderer.char_buffer.iter().filter(|c| **c != ' ').count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn test_grid_larger_than_frame() {
        let frame = vec![Vector3::new(255.0, 255.0, 255.0); 4];
        let mut renderer = AsciiRenderer::new(6, 3);
        renderer.rasterize_frame(&frame, 2, 2);
        assert!(renderer.char_buffer.iter().all(|c| *c == '@'));
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let mut renderer = AsciiRenderer::new(3, 2);
        renderer.char_buffer = vec!['@', ' ', '.', '#', '#', '#'];
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('@'));
        assert_eq!(text.matches("\r\n").count(), 2);
    }
}
