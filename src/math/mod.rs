//! Fixed-size linear algebra over `f64`.
//!
//! Both types are generic over their dimension so the 2D-homogeneous path
//! (`Vec3`/`Mat3`) and the 3D-homogeneous path (`Vec4`/`Mat4`) share one
//! implementation while remaining distinct, non-interchangeable types.

pub mod matrix;
pub mod vector;

pub use matrix::{Mat3, Mat4, Matrix};
pub use vector::{Vec3, Vec4, Vector};
