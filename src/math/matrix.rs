//! N×N transformation matrix, row-major.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `M * v`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! # Example
//! ```ignore
//! let transform = Mat4::rotation(30.0, Axis::Z) * Mat4::scaling(2.0, 2.0, 2.0);
//! let result = transform * vertex; // scale first, then rotate
//! ```

use std::ops::Mul;

use super::vector::Vector;

/// Square matrix stored as `rows[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const N: usize> {
    rows: [[f64; N]; N],
}

pub type Mat3 = Matrix<3>;
pub type Mat4 = Matrix<4>;

impl<const N: usize> Matrix<N> {
    pub const fn new(rows: [[f64; N]; N]) -> Self {
        Self { rows }
    }

    pub fn identity() -> Self {
        Self::new(std::array::from_fn(|row| {
            std::array::from_fn(|col| if row == col { 1.0 } else { 0.0 })
        }))
    }

    /// Builds a matrix whose rows are the given vectors.
    pub fn from_rows(rows: [Vector<N>; N]) -> Self {
        Self::new(rows.map(|r| *r.as_array()))
    }

    pub fn transpose(&self) -> Self {
        Self::new(std::array::from_fn(|row| {
            std::array::from_fn(|col| self.rows[col][row])
        }))
    }

    pub fn row(&self, row: usize) -> Vector<N> {
        Vector::from_array(self.rows[row])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.rows[row][col] = value;
    }
}

impl<const N: usize> Default for Matrix<N> {
    fn default() -> Self {
        Self::identity()
    }
}

/// Matrix composition: `A * B` applies B first, then A.
///
/// The right operand is transposed once so that every product entry is a
/// dot product of two contiguous rows.
impl<const N: usize> Mul for Matrix<N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let rhs_t = rhs.transpose();
        Self::new(std::array::from_fn(|row| {
            std::array::from_fn(|col| self.row(row).dot(rhs_t.row(col)))
        }))
    }
}

/// Transform a column vector: `M * v`.
impl<const N: usize> Mul<Vector<N>> for Matrix<N> {
    type Output = Vector<N>;

    fn mul(self, v: Vector<N>) -> Self::Output {
        Vector::from_array(std::array::from_fn(|row| self.row(row).dot(v)))
    }
}
