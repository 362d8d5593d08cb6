//! Clipping against an axis-aligned 2D window.
//!
//! Each edge tests a single coordinate against a literal boundary value, so
//! the same clipper works on 2D homogeneous polygons (`Polygon<3>`) and on
//! screen-space 3D polygons (`Polygon<4>`), where only x and y matter.

use rayon::prelude::*;

use super::{clip_against_all, ClipBoundary};
use crate::math::Vector;
use crate::polygon::Polygon;
use crate::viewport::Window2d;

/// One edge of the clip window. The value is the boundary coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEdge {
    /// Keeps `x <= value`.
    Right(f64),
    /// Keeps `y <= value`.
    Top(f64),
    /// Keeps `x >= value`.
    Left(f64),
    /// Keeps `y >= value`.
    Bottom(f64),
}

impl WindowEdge {
    /// Index of the coordinate this edge tests.
    fn component(&self) -> usize {
        match self {
            Self::Right(_) | Self::Left(_) => 0,
            Self::Top(_) | Self::Bottom(_) => 1,
        }
    }

    fn value(&self) -> f64 {
        match *self {
            Self::Right(v) | Self::Top(v) | Self::Left(v) | Self::Bottom(v) => v,
        }
    }
}

impl<const N: usize> ClipBoundary<N> for WindowEdge {
    fn signed_distance(&self, v: &Vector<N>) -> f64 {
        let c = v[self.component()];
        match *self {
            Self::Right(b) | Self::Top(b) => b - c,
            Self::Left(b) | Self::Bottom(b) => c - b,
        }
    }

    /// Moves from `s` along the edge direction by the fraction of the
    /// tested coordinate left to reach the boundary.
    fn intersect(&self, s: &Vector<N>, p: &Vector<N>) -> Vector<N> {
        let component = self.component();
        let dir = *p - *s;
        let t = ((self.value() - s[component]) / dir[component]).abs();
        *s + dir * t
    }
}

/// Clips against the four window edges in the order right, top, left, bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowClipper {
    edges: [WindowEdge; 4],
}

impl WindowClipper {
    pub fn new(window: &Window2d) -> Self {
        Self {
            edges: [
                WindowEdge::Right(window.right),
                WindowEdge::Top(window.top),
                WindowEdge::Left(window.left),
                WindowEdge::Bottom(window.bottom),
            ],
        }
    }

    pub fn edges(&self) -> &[WindowEdge; 4] {
        &self.edges
    }

    /// Returns `None` if the polygon lies entirely outside the window.
    pub fn clip_polygon<const N: usize>(&self, polygon: &Polygon<N>) -> Option<Polygon<N>> {
        clip_against_all(polygon, &self.edges)
    }

    /// Clips each polygon independently on the rayon pool, dropping the ones
    /// clipped away entirely.
    pub fn clip_polygons<const N: usize>(&self, polygons: &[Polygon<N>]) -> Vec<Polygon<N>> {
        polygons
            .par_iter()
            .filter_map(|p| self.clip_polygon(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Mat3, Vec3};
    use crate::viewport::PixelRect;
    use approx::assert_relative_eq;

    fn unit_square() -> Polygon<3> {
        Polygon::new(vec![
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
        ])
    }

    /// Scales the unit square, clips it to [-1, 1]² and maps the result onto
    /// the viewport [100, 700] x [100, 500].
    fn scaled_square_on_viewport(scale: f64) -> Option<Vec<(f64, f64)>> {
        let window = Window2d::new(-1.0, 1.0, -1.0, 1.0);
        let viewport = PixelRect::new(100.0, 700.0, 100.0, 500.0);
        let tm = Mat3::translation(0.0, 0.0) * Mat3::scaling(scale, scale);
        let clipped = WindowClipper::new(&window).clip_polygon(&unit_square().transformed(&tm))?;
        let mapped = clipped.transformed(&window.to_viewport(&viewport));
        Some(mapped.vertices.iter().map(|v| (v.x(), v.y())).collect())
    }

    #[test]
    fn polygon_inside_window_is_unchanged() {
        let vertices = scaled_square_on_viewport(0.5).unwrap();
        assert_eq!(
            vertices,
            vec![(550.0, 400.0), (250.0, 400.0), (250.0, 200.0), (550.0, 200.0)]
        );
    }

    #[test]
    fn oversized_polygon_is_clipped_to_window_boundary() {
        let vertices = scaled_square_on_viewport(3.0).unwrap();
        let expected = [(700.0, 100.0), (700.0, 500.0), (100.0, 500.0), (100.0, 100.0)];
        assert_eq!(vertices.len(), expected.len());
        for ((x, y), (ex, ey)) in vertices.iter().zip(expected) {
            assert_relative_eq!(*x, ex, epsilon = 1e-9);
            assert_relative_eq!(*y, ey, epsilon = 1e-9);
        }
    }

    #[test]
    fn intersection_keeps_homogeneous_w() {
        let edge = WindowEdge::Right(1.0);
        let hit = ClipBoundary::<3>::intersect(&edge, &Vec3::new(0.0, 0.0, 1.0), &Vec3::new(4.0, 2.0, 1.0));
        assert_eq!(hit, Vec3::new(1.0, 0.5, 1.0));
    }

    #[test]
    fn polygon_outside_window_is_dropped() {
        let far = unit_square().transformed(&Mat3::translation(5.0, 0.0));
        let clipper = WindowClipper::new(&Window2d::new(-1.0, 1.0, -1.0, 1.0));
        assert!(clipper.clip_polygon(&far).is_none());
        assert_eq!(clipper.clip_polygons(&[far, unit_square()]).len(), 1);
    }

    #[test]
    fn rotated_polygon_inside_window_is_unchanged() {
        let clipper = WindowClipper::new(&Window2d::new(-1.0, 1.0, -1.0, 1.0));
        let tilted = unit_square().transformed(&(Mat3::rotation(30.0) * Mat3::scaling(0.6, 0.6)));
        assert_eq!(clipper.clip_polygon(&tilted), Some(tilted));
    }

    #[test]
    fn clipped_vertices_stay_within_window() {
        let clipper = WindowClipper::new(&Window2d::new(-1.0, 1.0, -1.0, 1.0));
        let tilted = unit_square().transformed(&(Mat3::rotation(30.0) * Mat3::scaling(1.3, 1.3)));
        let clipped = clipper.clip_polygon(&tilted).unwrap();
        // corners poke out on all four sides
        assert_eq!(clipped.len(), 8);
        for v in &clipped.vertices {
            assert!(v.x().abs() <= 1.0 + 1e-9 && v.y().abs() <= 1.0 + 1e-9);
        }
    }
}
