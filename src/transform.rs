//! Transform construction.
//!
//! Matrix constructors for scaling, rotation and translation in both the
//! 2D-homogeneous (`Mat3`) and 3D-homogeneous (`Mat4`) spaces, plus a
//! [`Transform`] builder that accumulates them the way scene scripts do:
//! each new operation is applied *after* everything before it
//! (`TM = op * TM`).

use rayon::prelude::*;

use crate::math::{Mat3, Mat4};
use crate::polygon::Polygon;

/// Rotation axis for 3D rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Picks the single axis a `rotate x y z` command rotates about.
    ///
    /// Only one axis rotates per command: x if its angle is non-zero, else y
    /// if non-zero, else z.
    pub fn select(x: f64, y: f64, z: f64) -> (Axis, f64) {
        if x != 0.0 {
            (Axis::X, x)
        } else if y != 0.0 {
            (Axis::Y, y)
        } else {
            (Axis::Z, z)
        }
    }
}

impl Mat4 {
    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        Mat4::new([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Translation is stored in the last column.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, dx],
            [0.0, 1.0, 0.0, dy],
            [0.0, 0.0, 1.0, dz],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed rotation by `degrees` about `axis`.
    pub fn rotation(degrees: f64, axis: Axis) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        match axis {
            Axis::X => Mat4::new([
                [1.0, 0.0, 0.0, 0.0],
                [0.0, c, -s, 0.0],
                [0.0, s, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Axis::Y => Mat4::new([
                [c, 0.0, s, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [-s, 0.0, c, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            Axis::Z => Mat4::new([
                [c, -s, 0.0, 0.0],
                [s, c, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
        }
    }

    /// Rotation for a `rotate x y z` triple, see [`Axis::select`].
    pub fn rotation_from_angles(x: f64, y: f64, z: f64) -> Self {
        let (axis, degrees) = Axis::select(x, y, z);
        Mat4::rotation(degrees, axis)
    }
}

impl Mat3 {
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Mat3::new([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Mat3::new([[1.0, 0.0, dx], [0.0, 1.0, dy], [0.0, 0.0, 1.0]])
    }

    /// Counter-clockwise rotation by `degrees` in the plane.
    pub fn rotation(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Mat3::new([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }
}

/// Accumulated 3D model transform.
///
/// Every method returns a new transform with the operation applied after
/// the existing ones:
///
/// ```ignore
/// let tm = Transform::new().scale(2.0, 2.0, 2.0).rotate(0.0, 0.0, 90.0).translate(1.0, 0.0, 0.0);
/// // scale first, then rotate, then translate
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Transform {
    matrix: Mat4,
}

impl Transform {
    /// The identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Applies `op` after the current transform.
    pub fn then(self, op: Mat4) -> Self {
        Self {
            matrix: op * self.matrix,
        }
    }

    pub fn scale(self, sx: f64, sy: f64, sz: f64) -> Self {
        self.then(Mat4::scaling(sx, sy, sz))
    }

    pub fn rotate(self, x: f64, y: f64, z: f64) -> Self {
        self.then(Mat4::rotation_from_angles(x, y, z))
    }

    pub fn translate(self, dx: f64, dy: f64, dz: f64) -> Self {
        self.then(Mat4::translation(dx, dy, dz))
    }
}

/// Applies `m` to every polygon.
///
/// Above `parallel_threshold` polygons the work fans out over the rayon pool;
/// below it the scheduling overhead outweighs the gain.
pub fn transform_polygons<const N: usize>(
    m: &crate::math::Matrix<N>,
    polygons: &[Polygon<N>],
    parallel_threshold: usize,
) -> Vec<Polygon<N>> {
    if polygons.len() > parallel_threshold {
        polygons.par_iter().map(|p| p.transformed(m)).collect()
    } else {
        polygons.iter().map(|p| p.transformed(m)).collect()
    }
}
