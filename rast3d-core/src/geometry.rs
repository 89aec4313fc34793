/// Indexed triangle geometry handed to the rasterizer
use nalgebra::Vector3;

/// A triangle mesh as separate position and index buffers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub positions: Vec<Vector3<f32>>,
    pub indices: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(triangles * 3),
            indices: Vec::with_capacity(triangles),
        }
    }

    /// Append a triangle with its own three vertices.
    pub fn add_triangle(&mut self, v0: Vector3<f32>, v1: Vector3<f32>, v2: Vector3<f32>) {
        let base = self.positions.len();
        self.positions.extend([v0, v1, v2]);
        self.indices.push([base, base + 1, base + 2]);
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// The single triangle in the z = -2 plane rendered by default.
    pub fn default_triangle() -> Self {
        Self {
            positions: vec![
                Vector3::new(2.0, 0.0, -2.0),
                Vector3::new(0.0, 2.0, -2.0),
                Vector3::new(-2.0, 0.0, -2.0),
            ],
            indices: vec![[0, 1, 2]],
        }
    }

}
