//! Perspective projection parameters.
//!
//! The [`Projection`] struct holds the observer's hither/yon planes and the
//! half-angle of view, and generates the perspective matrix used before
//! homogeneous clipping.
//!
//! The matrix maps view space to a clip space where the visible volume is
//! `-w <= x <= w`, `-w <= y <= w`, `0 <= z <= w`, and the w row is
//! `tan(half_angle) * z`.

use crate::math::Mat4;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Near (hither) plane distance.
    hither: f64,
    /// Far (yon) plane distance.
    yon: f64,
    /// Half-angle of view in radians.
    half_angle: f64,
}

impl Projection {
    /// Creates a new projection. `half_angle` is in radians.
    pub fn new(hither: f64, yon: f64, half_angle: f64) -> Self {
        Self {
            hither,
            yon,
            half_angle,
        }
    }

    /// Creates a projection from a half-angle in degrees, the unit scene
    /// scripts use.
    pub fn from_degrees(hither: f64, yon: f64, half_angle_degrees: f64) -> Self {
        Self::new(hither, yon, half_angle_degrees.to_radians())
    }

    pub fn hither(&self) -> f64 {
        self.hither
    }

    pub fn yon(&self) -> f64 {
        self.yon
    }

    /// Returns the half-angle of view in radians.
    pub fn half_angle(&self) -> f64 {
        self.half_angle
    }

    /// Generates the perspective matrix for a viewport of the given aspect
    /// ratio (width / height).
    ///
    /// Points on the hither plane land at clip z = 0 and points on the yon
    /// plane at z = w.
    pub fn matrix(&self, aspect_ratio: f64) -> Mat4 {
        let tan = self.half_angle.tan();
        let a33 = self.yon / (self.yon - self.hither) * tan;
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, aspect_ratio, 0.0, 0.0],
            [0.0, 0.0, a33, -self.hither * a33],
            [0.0, 0.0, tan, 0.0],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn from_degrees_converts_correctly() {
        let proj = Projection::from_degrees(1.0, 10.0, 45.0);
        assert_relative_eq!(proj.half_angle(), std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn hither_and_yon_map_to_depth_range() {
        let proj = Projection::from_degrees(2.0, 20.0, 30.0);
        let m = proj.matrix(1.0);

        let near = (m * Vec4::point(0.0, 0.0, 2.0)).perspective_divide().unwrap();
        let far = (m * Vec4::point(0.0, 0.0, 20.0)).perspective_divide().unwrap();
        assert_relative_eq!(near.z(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(far.z(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn w_row_is_tan_half_angle_times_z() {
        let proj = Projection::from_degrees(1.0, 100.0, 45.0);
        let clip = proj.matrix(1.0) * Vec4::point(3.0, -2.0, 7.0);
        assert_relative_eq!(clip.w(), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn edge_of_field_of_view_maps_to_unit_x() {
        // at 45 degrees the frustum edge is x == z
        let proj = Projection::from_degrees(1.0, 100.0, 45.0);
        let ndc = (proj.matrix(1.0) * Vec4::point(5.0, 0.0, 5.0))
            .perspective_divide()
            .unwrap();
        assert_relative_eq!(ndc.x(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn aspect_ratio_scales_y() {
        let proj = Projection::from_degrees(1.0, 100.0, 45.0);
        let clip = proj.matrix(1.5) * Vec4::point(0.0, 2.0, 5.0);
        assert_relative_eq!(clip.y(), 3.0, epsilon = 1e-12);
    }
}
