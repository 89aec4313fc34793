/// Model transforms: fixed-Z rotation and arbitrary-axis quaternion rotation
use nalgebra::{Matrix4, Vector3};

use crate::angle::deg_to_rad;
use crate::error::TransformError;

/// Which model rotation the driver applies each frame.
///
/// Exactly one variant is active per run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RotationMode {
    /// Rotate about +Z using the direct cos/sin form.
    #[default]
    SingleAxisZ,
    /// Rotate about a caller-supplied axis (need not be unit length).
    ArbitraryAxis(Vector3<f32>),
}

impl RotationMode {
    /// Build the model matrix for `angle_deg` degrees under this mode.
    pub fn model_matrix(&self, angle_deg: f32) -> Result<Matrix4<f32>, TransformError> {
        match self {
            RotationMode::SingleAxisZ => Ok(rotation_z(angle_deg)),
            RotationMode::ArbitraryAxis(axis) => rotation_about_axis(*axis, angle_deg),
        }
    }
}

/// Rotation of `angle_deg` degrees about +Z, counter-clockwise when looking
/// down the axis toward the origin.
///
/// Only the upper-left 2x2 block differs from identity.
pub fn rotation_z(angle_deg: f32) -> Matrix4<f32> {
    let (sin, cos) = deg_to_rad(angle_deg).sin_cos();

    let mut model = Matrix4::identity();
    model[(0, 0)] = cos;
    model[(0, 1)] = -sin;
    model[(1, 0)] = sin;
    model[(1, 1)] = cos;
    model
}

/// Rotation of `angle_deg` degrees about `axis`, built from the half-angle
/// unit quaternion.
///
/// The axis is normalized first; only an all-zero axis or one with a
/// non-finite component yields [`TransformError::InvalidAxis`]. The last row
/// and column stay (0, 0, 0, 1).
pub fn rotation_about_axis(
    axis: Vector3<f32>,
    angle_deg: f32,
) -> Result<Matrix4<f32>, TransformError> {
    let invalid = || TransformError::InvalidAxis {
        x: axis.x,
        y: axis.y,
        z: axis.z,
    };
    if axis.iter().any(|c| !c.is_finite()) {
        return Err(invalid());
    }
    // Scale by the largest component so the norm neither overflows nor
    // underflows for very long or very short axes.
    let largest = axis.amax();
    if largest == 0.0 {
        return Err(invalid());
    }
    let axis = (axis / largest).normalize();

    let (half_sin, half_cos) = (deg_to_rad(angle_deg) / 2.0).sin_cos();
    let q0 = half_cos;
    let q1 = axis.x * half_sin;
    let q2 = axis.y * half_sin;
    let q3 = axis.z * half_sin;

    let mut model = Matrix4::identity();
    model[(0, 0)] = 1.0 - 2.0 * (q2 * q2 + q3 * q3);
    model[(0, 1)] = 2.0 * (q1 * q2 - q0 * q3);
    model[(0, 2)] = 2.0 * (q1 * q3 + q0 * q2);
    model[(1, 0)] = 2.0 * (q1 * q2 + q0 * q3);
    model[(1, 1)] = 1.0 - 2.0 * (q1 * q1 + q3 * q3);
    model[(1, 2)] = 2.0 * (q2 * q3 - q0 * q1);
    model[(2, 0)] = 2.0 * (q1 * q3 - q0 * q2);
    model[(2, 1)] = 2.0 * (q2 * q3 + q0 * q1);
    model[(2, 2)] = 1.0 - 2.0 * (q1 * q1 + q2 * q2);
    Ok(model)
}

/// Matrix composition helpers
pub struct Transform;

impl Transform {
    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}
