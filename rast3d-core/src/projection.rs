/// Camera, view and perspective projection utilities
use nalgebra::{Matrix4, Vector3};

use crate::angle::{deg_to_rad, DEFAULT_ASPECT, DEFAULT_FOV_DEG, DEFAULT_Z_FAR, DEFAULT_Z_NEAR};
use crate::error::TransformError;

/// Translation that moves `eye` to the origin.
///
/// The camera is axis aligned and looks down -Z, so there is no rotation part.
pub fn view_matrix(eye: Vector3<f32>) -> Matrix4<f32> {
    Matrix4::new_translation(&-eye)
}

/// Right-handed perspective projection.
///
/// `z_near` and `z_far` are positive distances along -Z. A point at
/// `z = -z_near` lands on NDC depth -1 and `z = -z_far` on +1 after the
/// divide by w. Only `z_near == z_far` is rejected; the remaining ranges
/// (`fov_deg` in (0, 180), positive aspect) are not checked here.
pub fn perspective(
    fov_deg: f32,
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
) -> Result<Matrix4<f32>, TransformError> {
    let depth = z_far - z_near;
    if depth == 0.0 || !depth.is_finite() {
        return Err(TransformError::InvalidClipRange { z_near, z_far });
    }

    let top = z_near * (deg_to_rad(fov_deg) / 2.0).tan();
    let right = top * aspect_ratio;

    let mut projection = Matrix4::identity();
    projection[(0, 0)] = z_near / right;
    projection[(1, 1)] = z_near / top;
    projection[(2, 2)] = -(z_far + z_near) / depth;
    projection[(2, 3)] = -2.0 * z_far * z_near / depth;
    projection[(3, 2)] = -1.0;
    projection[(3, 3)] = 0.0;
    Ok(projection)
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vector3<f32>,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            ..Self::default()
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        view_matrix(self.eye)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Result<Matrix4<f32>, TransformError> {
        perspective(self.fov_deg, self.aspect, self.z_near, self.z_far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vector3::new(0.0, 0.0, 5.0),
            fov_deg: DEFAULT_FOV_DEG,
            aspect: DEFAULT_ASPECT,
            z_near: DEFAULT_Z_NEAR,
            z_far: DEFAULT_Z_FAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector4};

    fn ndc_depth(projection: &Matrix4<f32>, z: f32) -> f32 {
        let clip = projection * Vector4::new(0.0, 0.0, z, 1.0);
        clip.z / clip.w
    }

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(camera.eye, Vector3::new(0.0, 0.0, 5.0));
        assert_eq!(Camera::new(700, 700), Camera::default());
    }

    #[test]
    fn test_view_maps_eye_to_origin() {
        for eye in [
            Vector3::new(0.0, 0.0, 5.0),
            Vector3::new(-1.5, 3.25, 0.0),
            Vector3::new(100.0, -0.125, -42.0),
        ] {
            let p = view_matrix(eye) * eye.push(1.0);
            assert_eq!(p, Vector4::new(0.0, 0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn test_view_has_no_rotation() {
        let view = view_matrix(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(view.fixed_view::<3, 3>(0, 0).into_owned(), Matrix3::identity());
        assert_eq!(view[(0, 3)], -1.0);
        assert_eq!(view[(1, 3)], -2.0);
        assert_eq!(view[(2, 3)], -3.0);
    }

    #[test]
    fn test_near_far_map_to_ndc_bounds() {
        for (near, far) in [(0.1, 50.0), (1.0, 2.0), (0.5, 1000.0), (3.0, 7.5)] {
            let projection = perspective(45.0, 1.0, near, far).unwrap();
            assert_relative_eq!(ndc_depth(&projection, -near), -1.0, epsilon = 1e-4);
            assert_relative_eq!(ndc_depth(&projection, -far), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_projection_terms() {
        let projection = perspective(90.0, 2.0, 1.0, 3.0).unwrap();
        // tan(45deg) == 1, so top == near and right == 2 * near
        assert_relative_eq!(projection[(0, 0)], 0.5, epsilon = 1e-6);
        assert_relative_eq!(projection[(1, 1)], 1.0, epsilon = 1e-6);
        assert_relative_eq!(projection[(2, 2)], -2.0, epsilon = 1e-6);
        assert_relative_eq!(projection[(2, 3)], -3.0, epsilon = 1e-6);
        assert_eq!(projection[(3, 2)], -1.0);
        assert_eq!(projection[(3, 3)], 0.0);
    }

    #[test]
    fn test_perspective_divide_uses_depth() {
        let projection = Camera::default().projection_matrix().unwrap();
        let clip = projection * Vector4::new(1.0, 1.0, -7.0, 1.0);
        assert_relative_eq!(clip.w, 7.0);
    }

    #[test]
    fn test_equal_clip_planes_rejected() {
        let err = perspective(45.0, 1.0, 5.0, 5.0).unwrap_err();
        assert_eq!(
            err,
            TransformError::InvalidClipRange {
                z_near: 5.0,
                z_far: 5.0
            }
        );
    }
}
