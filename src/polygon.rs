//! Polygons: ordered, cyclic vertex lists.
//!
//! The closing edge from the last vertex back to the first is implicit.
//! Clipping may leave a polygon with fewer than three vertices; such
//! polygons are [degenerate](Polygon::is_degenerate) and are dropped by the
//! pipeline rather than treated as errors.

use crate::colors::Color;
use crate::math::{Matrix, Vec3, Vec4, Vector};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon<const N: usize> {
    pub vertices: Vec<Vector<N>>,
}

impl<const N: usize> Polygon<N> {
    pub fn new(vertices: Vec<Vector<N>>) -> Self {
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Fewer than three vertices: no area left to draw.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Iterates edges `(s, p)` including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (&Vector<N>, &Vector<N>)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Applies `m` to every vertex.
    pub fn transformed(&self, m: &Matrix<N>) -> Self {
        Self::new(self.vertices.iter().map(|&v| *m * v).collect())
    }
}

/// Plane `a·x + b·y + c·z + d = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Plane {
    /// Solves the plane for z at `(x, y)`.
    ///
    /// Returns `None` for planes seen edge-on (`c == 0`).
    pub fn depth_at(&self, x: f64, y: f64) -> Option<f64> {
        if self.c.abs() <= f64::EPSILON {
            return None;
        }
        Some(-(self.a * x + self.b * y + self.d) / self.c)
    }

    /// Change in depth per unit step along +x.
    pub fn depth_step_x(&self) -> f64 {
        -self.a / self.c
    }
}

impl Polygon<4> {
    /// Unnormalized face normal `(v1 - v0) × (v2 - v1)` from the first
    /// non-collinear run of three consecutive vertices.
    ///
    /// The sign follows the winding order: in the left-handed screen space,
    /// a polygon that runs counter-clockwise with y up gets `z > 0`.
    pub fn raw_normal(&self) -> Option<Vec3> {
        let n = self.vertices.len();
        if n < 3 {
            return None;
        }
        (0..n).find_map(|i| {
            let v0 = self.vertices[i].xyz();
            let v1 = self.vertices[(i + 1) % n].xyz();
            let v2 = self.vertices[(i + 2) % n].xyz();
            let normal = (v1 - v0).cross(v2 - v1);
            normal.normalize().map(|_| normal)
        })
    }

    /// Unit face normal, or `None` when every vertex triple is collinear.
    pub fn normal(&self) -> Option<Vec3> {
        self.raw_normal().and_then(|n| n.normalize())
    }

    /// Plane through the first vertex with the polygon's unit normal.
    pub fn plane(&self) -> Option<Plane> {
        let normal = self.normal()?;
        let d = -normal.dot(self.vertices[0].xyz());
        Some(Plane {
            a: normal.x(),
            b: normal.y(),
            c: normal.z(),
            d,
        })
    }

    /// Divides every vertex by its w. `None` if any vertex has w = 0.
    pub fn perspective_divide(&self) -> Option<Self> {
        self.vertices
            .iter()
            .map(Vec4::perspective_divide)
            .collect::<Option<Vec<_>>>()
            .map(Self::new)
    }
}

/// A 3D polygon carrying the single flat colour it is filled with.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadedPolygon {
    pub polygon: Polygon<4>,
    pub color: Color,
}

impl ShadedPolygon {
    pub fn new(polygon: Polygon<4>, color: Color) -> Self {
        Self { polygon, color }
    }

    pub fn transformed(&self, m: &Matrix<4>) -> Self {
        Self::new(self.polygon.transformed(m), self.color)
    }
}
