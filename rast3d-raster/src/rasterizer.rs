/// Software rasterizer with handle-addressed geometry buffers
use std::collections::HashMap;
use std::ops::BitOr;

use nalgebra::{Matrix4, Vector3};
use rast3d_core::angle::{DEFAULT_Z_FAR, DEFAULT_Z_NEAR};
use rast3d_core::Transform;

use crate::error::RasterError;

/// Wireframe line color (0-255 scale)
const LINE_COLOR: Vector3<f32> = Vector3::new(255.0, 255.0, 255.0);

/// Per-vertex colors for filled triangles
const VERTEX_COLORS: [Vector3<f32>; 3] = [
    Vector3::new(255.0, 0.0, 0.0),
    Vector3::new(0.0, 255.0, 0.0),
    Vector3::new(0.0, 0.0, 255.0),
];

/// Triangles reaching further than this many frame widths off screen are
/// dropped, since nothing is clipped before rasterization.
const MAX_OFFSCREEN_FRAMES: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PosBufId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndBufId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Outline each triangle with three lines
    Triangle,
    /// Fill each triangle with depth testing and interpolated vertex colors
    FilledTriangle,
}

/// Set of buffers to reset in [`Rasterizer::clear`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buffers(u8);

impl Buffers {
    pub const COLOR: Buffers = Buffers(0b01);
    pub const DEPTH: Buffers = Buffers(0b10);

    pub fn contains(self, other: Buffers) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Buffers {
    type Output = Buffers;

    fn bitor(self, rhs: Buffers) -> Buffers {
        Buffers(self.0 | rhs.0)
    }
}

pub struct Rasterizer {
    width: usize,
    height: usize,
    model: Matrix4<f32>,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
    z_near: f32,
    z_far: f32,
    positions: HashMap<usize, Vec<Vector3<f32>>>,
    indices: HashMap<usize, Vec<[usize; 3]>>,
    next_id: usize,
    frame_buf: Vec<Vector3<f32>>,
    depth_buf: Vec<f32>,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            model: Matrix4::identity(),
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
            z_near: DEFAULT_Z_NEAR,
            z_far: DEFAULT_Z_FAR,
            positions: HashMap::new(),
            indices: HashMap::new(),
            next_id: 0,
            frame_buf: vec![Vector3::zeros(); size],
            depth_buf: vec![f32::INFINITY; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn load_positions(&mut self, positions: Vec<Vector3<f32>>) -> PosBufId {
        let id = self.next_id();
        self.positions.insert(id, positions);
        PosBufId(id)
    }

    pub fn load_indices(&mut self, indices: Vec<[usize; 3]>) -> IndBufId {
        let id = self.next_id();
        self.indices.insert(id, indices);
        IndBufId(id)
    }

    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn set_model(&mut self, model: Matrix4<f32>) {
        self.model = model;
    }

    pub fn set_view(&mut self, view: Matrix4<f32>) {
        self.view = view;
    }

    pub fn set_projection(&mut self, projection: Matrix4<f32>) {
        self.projection = projection;
    }

    /// Clip distances used to remap NDC depth into the depth buffer.
    pub fn set_depth_range(&mut self, z_near: f32, z_far: f32) {
        self.z_near = z_near;
        self.z_far = z_far;
    }

    pub fn clear(&mut self, buffers: Buffers) {
        if buffers.contains(Buffers::COLOR) {
            self.frame_buf.fill(Vector3::zeros());
        }
        if buffers.contains(Buffers::DEPTH) {
            self.depth_buf.fill(f32::INFINITY);
        }
    }

    pub fn frame_buffer(&self) -> &[Vector3<f32>] {
        &self.frame_buf
    }

    pub fn depth_buffer(&self) -> &[f32] {
        &self.depth_buf
    }

    /// Color at screen coordinate (x, y), origin at the bottom-left.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        self.index(x as i32, y as i32).map(|i| self.frame_buf[i])
    }

    /// Rasterize the triangles of `ind_id` over the vertices of `pos_id`
    /// under the current transforms.
    pub fn draw(
        &mut self,
        pos_id: PosBufId,
        ind_id: IndBufId,
        primitive: Primitive,
    ) -> Result<(), RasterError> {
        let positions = self
            .positions
            .get(&pos_id.0)
            .ok_or(RasterError::UnknownPositions(pos_id.0))?;
        let indices = self
            .indices
            .get(&ind_id.0)
            .ok_or(RasterError::UnknownIndices(ind_id.0))?;

        let mvp = Transform::mvp_matrix(&self.model, &self.view, &self.projection);
        let depth_scale = (self.z_far - self.z_near) / 2.0;
        let depth_offset = (self.z_far + self.z_near) / 2.0;
        let limit = MAX_OFFSCREEN_FRAMES * self.width.max(self.height) as f32;

        let mut triangles = Vec::with_capacity(indices.len());
        'triangles: for triangle in indices {
            let mut screen = [Vector3::zeros(); 3];
            for (slot, &index) in screen.iter_mut().zip(triangle) {
                let position = positions.get(index).ok_or(RasterError::IndexOutOfRange {
                    index,
                    len: positions.len(),
                })?;

                let clip = mvp * position.push(1.0);
                if clip.w == 0.0 {
                    log::trace!("skipping triangle {:?}: vertex at w = 0", triangle);
                    continue 'triangles;
                }
                let ndc = clip / clip.w;

                let vertex = Vector3::new(
                    0.5 * self.width as f32 * (ndc.x + 1.0),
                    0.5 * self.height as f32 * (ndc.y + 1.0),
                    ndc.z * depth_scale + depth_offset,
                );
                if !vertex.iter().all(|c| c.is_finite())
                    || vertex.x.abs() > limit
                    || vertex.y.abs() > limit
                {
                    log::trace!("skipping triangle {:?}: vertex far off screen", triangle);
                    continue 'triangles;
                }
                *slot = vertex;
            }
            triangles.push(screen);
        }

        for screen in &triangles {
            match primitive {
                Primitive::Triangle => self.rasterize_wireframe(screen),
                Primitive::FilledTriangle => self.rasterize_filled(screen),
            }
        }
        Ok(())
    }

    fn rasterize_wireframe(&mut self, v: &[Vector3<f32>; 3]) {
        self.draw_line(v[2], v[0]);
        self.draw_line(v[0], v[1]);
        self.draw_line(v[1], v[2]);
    }

    /// Bresenham line between the truncated endpoints, inclusive.
    fn draw_line(&mut self, begin: Vector3<f32>, end: Vector3<f32>) {
        let (mut x, mut y) = (begin.x as i32, begin.y as i32);
        let (x1, y1) = (end.x as i32, end.y as i32);

        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, LINE_COLOR);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn rasterize_filled(&mut self, v: &[Vector3<f32>; 3]) {
        // Bounding box, clipped to screen bounds
        let min_x = v[0].x.min(v[1].x).min(v[2].x).floor().max(0.0) as i32;
        let max_x = (v[0].x.max(v[1].x).max(v[2].x).ceil() as i32).min(self.width as i32 - 1);
        let min_y = v[0].y.min(v[1].y).min(v[2].y).floor().max(0.0) as i32;
        let max_y = (v[0].y.max(v[1].y).max(v[2].y).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) = barycentric(
                    (v[0].x, v[0].y),
                    (v[1].x, v[1].y),
                    (v[2].x, v[2].y),
                    p,
                ) else {
                    // Degenerate triangle covers no pixels
                    return;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v[0].z + w1 * v[1].z + w2 * v[2].z;
                let Some(idx) = self.index(x, y) else {
                    continue;
                };
                if depth < self.depth_buf[idx] {
                    self.depth_buf[idx] = depth;
                    self.frame_buf[idx] =
                        VERTEX_COLORS[0] * w0 + VERTEX_COLORS[1] * w1 + VERTEX_COLORS[2] * w2;
                }
            }
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Vector3<f32>) {
        if let Some(idx) = self.index(x, y) {
            self.frame_buf[idx] = color;
        }
    }

    /// Buffer index of screen coordinate (x, y); rows are stored top-down.
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((self.height - 1 - y as usize) * self.width + x as usize)
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
