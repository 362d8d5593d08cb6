//! N-component vector for homogeneous coordinates.
//!
//! `Vector<3>` holds 2D homogeneous points `(x, y, w)` or plain 3D directions,
//! `Vector<4>` holds 3D homogeneous points `(x, y, z, w)`. All operations are
//! pure and return a fresh value.

use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

/// Magnitudes at or below this are treated as zero when normalizing.
pub const NORMALIZE_EPSILON: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<const N: usize>([f64; N]);

pub type Vec3 = Vector<3>;
pub type Vec4 = Vector<4>;

impl<const N: usize> Vector<N> {
    pub const ZERO: Self = Self([0.0; N]);

    pub const fn from_array(components: [f64; N]) -> Self {
        Self(components)
    }

    pub fn as_array(&self) -> &[f64; N] {
        &self.0
    }

    /// Standard inner product.
    pub fn dot(&self, other: Self) -> f64 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    /// Divides every component by the Euclidean norm.
    ///
    /// Returns `None` for a zero-length (or non-finite) vector, where the
    /// direction is undefined.
    pub fn normalize(&self) -> Option<Self> {
        let magnitude = self.magnitude();
        if !magnitude.is_finite() || magnitude <= NORMALIZE_EPSILON {
            return None;
        }
        Some(*self / magnitude)
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Self(self.0.map(|c| c * scalar))
    }

    /// Linearly interpolate between two vectors.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        self + (other - self) * t
    }
}

impl Vector<3> {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self([x, y, z])
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = other.0;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }
}

impl Vector<4> {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self([x, y, z, w])
    }

    /// Create a point (w=1) from x, y, z coordinates.
    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// Create a direction vector (w=0) from x, y, z coordinates.
    pub const fn direction(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z, 0.0)
    }

    pub fn x(&self) -> f64 {
        self.0[0]
    }

    pub fn y(&self) -> f64 {
        self.0[1]
    }

    pub fn z(&self) -> f64 {
        self.0[2]
    }

    pub fn w(&self) -> f64 {
        self.0[3]
    }

    /// Screen position `(x, y)`.
    pub fn xy(&self) -> (f64, f64) {
        (self.0[0], self.0[1])
    }

    /// Drops the homogeneous component.
    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.0[0], self.0[1], self.0[2])
    }

    /// Cross product of the spatial parts; the result is a direction (w=0).
    pub fn cross(&self, other: Self) -> Self {
        let c = self.xyz().cross(other.xyz());
        Self::direction(c.x(), c.y(), c.z())
    }

    /// Divides x, y, z by w and sets w to exactly 1.
    ///
    /// Returns `None` when w is zero (a point at infinity).
    pub fn perspective_divide(&self) -> Option<Self> {
        let w = self.w();
        if w == 0.0 {
            return None;
        }
        if w == 1.0 {
            return Some(*self);
        }
        Some(Self::point(self.x() / w, self.y() / w, self.z() / w))
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> From<[f64; N]> for Vector<N> {
    fn from(components: [f64; N]) -> Self {
        Self(components)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

/// Component-wise addition of two vectors.
impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

/// Component-wise subtraction of two vectors.
impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

/// Scalar multiplication of a vector.
impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

/// Scalar on the left: `t * v`.
impl<const N: usize> Mul<Vector<N>> for f64 {
    type Output = Vector<N>;

    fn mul(self, rhs: Vector<N>) -> Self::Output {
        rhs.scale(self)
    }
}

impl<const N: usize> Div<f64> for Vector<N> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0.map(|c| c / rhs))
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(self.0.map(|c| -c))
    }
}
