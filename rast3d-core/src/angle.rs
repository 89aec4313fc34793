/// Degree/radian conversion and the default camera constants
use std::f32::consts::PI;

/// Vertical field of view used when nothing else is configured (degrees)
pub const DEFAULT_FOV_DEG: f32 = 45.0;
pub const DEFAULT_ASPECT: f32 = 1.0;
pub const DEFAULT_Z_NEAR: f32 = 0.1;
pub const DEFAULT_Z_FAR: f32 = 50.0;

/// Angle change applied per interactive key press (degrees)
pub const ANGLE_STEP_DEG: f32 = 10.0;

#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * PI / 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_angles() {
        assert_eq!(deg_to_rad(0.0), 0.0);
        assert_relative_eq!(deg_to_rad(180.0), PI, epsilon = 1e-6);
        assert_relative_eq!(deg_to_rad(-90.0), -PI / 2.0, epsilon = 1e-6);
        assert_relative_eq!(deg_to_rad(45.0), PI / 4.0, epsilon = 1e-6);
        assert_relative_eq!(deg_to_rad(360.0), 2.0 * PI, epsilon = 1e-6);
    }

    #[test]
    fn test_conversion_is_linear() {
        for deg in [-720.0_f32, -33.3, 1.0, 10.0, 359.0] {
            assert_relative_eq!(deg_to_rad(deg), deg * deg_to_rad(1.0), epsilon = 1e-4);
        }
    }
}
