//! Observer (look-at camera).
//!
//! # Coordinate System
//!
//! The world is **right-handed** with +Y up. The observer stage mirrors x so
//! that the rest of the pipeline works in a **left-handed** screen space:
//! - X: positive right
//! - Y: positive up
//! - Z: positive away from the eye
//!
//! # Composition
//!
//! `view_projection = Projection * Tilt * Mirror * Basis * Translate(-eye)`

use crate::error::GeometryError;
use crate::math::{Mat4, Vec4};
use crate::projection::Projection;
use crate::transform::Axis;

/// World up used to build the camera basis.
const WORLD_UP: Vec4 = Vec4::direction(0.0, 1.0, 0.0);

/// Eye, center of interest, tilt and projection parameters of a scene.
///
/// Immutable once built from the `observer` command; the matrix is a pure
/// function of these fields and the viewport aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    eye: Vec4,
    center_of_interest: Vec4,
    /// Tilt about the view axis, in degrees.
    tilt: f64,
    projection: Projection,
}

impl Observer {
    pub fn new(eye: Vec4, center_of_interest: Vec4, tilt: f64, projection: Projection) -> Self {
        Self {
            eye,
            center_of_interest,
            tilt,
            projection,
        }
    }

    pub fn eye(&self) -> Vec4 {
        self.eye
    }

    pub fn center_of_interest(&self) -> Vec4 {
        self.center_of_interest
    }

    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Rotation taking world directions into the camera basis.
    ///
    /// Rows are right, up and view direction. Fails when the eye sits on the
    /// center of interest or looks straight along the world up axis.
    fn basis(&self) -> Result<Mat4, GeometryError> {
        let view_dir = self.center_of_interest - self.eye;
        let view_dir = Vec4::direction(view_dir.x(), view_dir.y(), view_dir.z());
        let right = WORLD_UP.cross(view_dir);
        let up = view_dir.cross(right);

        let normalized = |v: Vec4| v.normalize().ok_or(GeometryError::DegenerateView);
        Ok(Mat4::from_rows([
            normalized(right)?,
            normalized(up)?,
            normalized(view_dir)?,
            Vec4::point(0.0, 0.0, 0.0),
        ]))
    }

    /// World to camera space: translate the eye to the origin, rotate into the
    /// camera basis, mirror x, then apply the tilt.
    pub fn view_matrix(&self) -> Result<Mat4, GeometryError> {
        let to_origin = Mat4::translation(-self.eye.x(), -self.eye.y(), -self.eye.z());
        let mirror = Mat4::scaling(-1.0, 1.0, 1.0);
        let tilt = Mat4::rotation(-self.tilt, Axis::Z);
        Ok(tilt * mirror * self.basis()? * to_origin)
    }

    /// Full world to clip space matrix for a viewport with the given aspect
    /// ratio (width / height).
    pub fn view_projection(&self, aspect_ratio: f64) -> Result<Mat4, GeometryError> {
        Ok(self.projection.matrix(aspect_ratio) * self.view_matrix()?)
    }
}
