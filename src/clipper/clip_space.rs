//! Clip-space clipping against the homogeneous view volume.
//!
//! Clipping occurs after projection (in homogeneous clip space), before the
//! perspective divide. The clip volume is defined by:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//!  0 <= z <= w
//! ```
//!
//! The projection maps the hither plane to `z = 0`, so the `z >= 0` plane
//! also guarantees `w > 0` for every surviving vertex and the divide is safe.

use rayon::prelude::*;

use super::{clip_against_all, ClipBoundary};
use crate::math::Vec4;
use crate::polygon::Polygon;

/// The 6 planes of the clip volume.
///
/// Each plane is a linear functional of `(x, y, z, w)` that is non-negative
/// inside the volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// x <= w
    Right,
    /// x >= -w
    Left,
    /// y <= w
    Top,
    /// y >= -w
    Bottom,
    /// z <= w (yon)
    Far,
    /// z >= 0 (hither)
    Near,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        Self::Right,
        Self::Left,
        Self::Top,
        Self::Bottom,
        Self::Far,
        Self::Near,
    ];
}

impl ClipBoundary<4> for ClipPlane {
    fn signed_distance(&self, p: &Vec4) -> f64 {
        match self {
            Self::Right => p.w() - p.x(),
            Self::Left => p.w() + p.x(),
            Self::Top => p.w() - p.y(),
            Self::Bottom => p.w() + p.y(),
            Self::Far => p.w() - p.z(),
            Self::Near => p.z(),
        }
    }
}

/// Clips polygons against the clip volume.
///
/// Stateless: the planes are fixed, so the clipper never needs rebuilding
/// when the observer changes.
#[derive(Debug, Clone, Copy)]
pub struct ClipSpaceClipper {
    planes: [ClipPlane; 6],
}

impl ClipSpaceClipper {
    pub fn new() -> Self {
        Self {
            planes: ClipPlane::ALL,
        }
    }

    /// Clip a polygon against all 6 planes.
    ///
    /// Returns `None` if the polygon was entirely outside the volume.
    pub fn clip_polygon(&self, polygon: &Polygon<4>) -> Option<Polygon<4>> {
        clip_against_all(polygon, &self.planes)
    }

    /// Clips every polygon on the rayon pool, dropping the empty results.
    pub fn clip_polygons(&self, polygons: &[Polygon<4>]) -> Vec<Polygon<4>> {
        polygons
            .par_iter()
            .filter_map(|p| self.clip_polygon(p))
            .collect()
    }
}

impl Default for ClipSpaceClipper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inside(v: &Vec4) -> bool {
        ClipPlane::ALL
            .iter()
            .all(|plane| plane.signed_distance(v) >= -1e-9)
    }

    /// Every turn of the polygon bends the same way in the xy plane.
    fn is_convex_xy(polygon: &Polygon<4>) -> bool {
        let n = polygon.len();
        let turns: Vec<f64> = (0..n)
            .map(|i| {
                let a = polygon.vertices[i];
                let b = polygon.vertices[(i + 1) % n];
                let c = polygon.vertices[(i + 2) % n];
                (b - a).xyz().cross((c - b).xyz()).z()
            })
            .collect();
        turns.iter().all(|&t| t >= -1e-12) || turns.iter().all(|&t| t <= 1e-12)
    }

    #[test]
    fn polygon_inside_volume_is_unchanged() {
        let poly = Polygon::new(vec![
            Vec4::new(-0.5, -0.5, 0.5, 1.0),
            Vec4::new(0.5, -0.5, 0.5, 1.0),
            Vec4::new(0.0, 0.5, 0.5, 1.0),
        ]);
        let clipped = ClipSpaceClipper::new().clip_polygon(&poly).unwrap();
        assert_eq!(clipped, poly);

        // round trip through the divide leaves w = 1 points untouched
        assert_eq!(clipped.perspective_divide().unwrap(), poly);
    }

    #[test]
    fn triangle_crossing_two_planes_becomes_square() {
        let poly = Polygon::new(vec![
            Vec4::new(0.0, 0.0, 0.5, 1.0),
            Vec4::new(3.0, 0.0, 0.5, 1.0),
            Vec4::new(0.0, 3.0, 0.5, 1.0),
        ]);
        let clipped = ClipSpaceClipper::new().clip_polygon(&poly).unwrap();
        let expected = [(0.0, 1.0), (0.0, 0.0), (1.0, 0.0), (1.0, 1.0)];
        assert_eq!(clipped.len(), expected.len());
        for (v, (x, y)) in clipped.vertices.iter().zip(expected) {
            assert_relative_eq!(v.x(), x, epsilon = 1e-12);
            assert_relative_eq!(v.y(), y, epsilon = 1e-12);
            assert_relative_eq!(v.w(), 1.0);
        }
        assert!(is_convex_xy(&clipped));
    }

    #[test]
    fn clipped_convex_polygon_stays_convex_and_inside() {
        let poly = Polygon::new(vec![
            Vec4::new(-2.0, -0.2, 0.3, 1.0),
            Vec4::new(0.4, -1.7, 0.6, 1.0),
            Vec4::new(1.9, 0.1, 0.9, 1.0),
            Vec4::new(0.2, 1.4, 0.4, 1.0),
        ]);
        let clipped = ClipSpaceClipper::new().clip_polygon(&poly).unwrap();
        assert!(clipped.len() >= 3);
        assert!(clipped.vertices.iter().all(inside));
        assert!(is_convex_xy(&clipped));
    }

    #[test]
    fn near_plane_keeps_w_positive() {
        // straddles the hither plane with one vertex behind it
        let poly = Polygon::new(vec![
            Vec4::new(-0.2, 0.0, -1.0, 0.1),
            Vec4::new(0.2, 0.0, -1.0, 0.1),
            Vec4::new(0.0, 0.5, 1.0, 2.0),
        ]);
        let clipped = ClipSpaceClipper::new().clip_polygon(&poly).unwrap();
        for v in &clipped.vertices {
            assert!(v.z() >= -1e-12);
            assert!(v.w() > 0.0);
        }
    }

    #[test]
    fn polygon_outside_volume_is_dropped() {
        let behind = Polygon::new(vec![
            Vec4::new(0.0, 0.0, -1.0, 1.0),
            Vec4::new(0.5, 0.0, -1.0, 1.0),
            Vec4::new(0.0, 0.5, -1.0, 1.0),
        ]);
        let clipper = ClipSpaceClipper::default();
        assert!(clipper.clip_polygon(&behind).is_none());

        let visible = Polygon::new(vec![
            Vec4::new(0.0, 0.0, 0.5, 1.0),
            Vec4::new(0.5, 0.0, 0.5, 1.0),
            Vec4::new(0.0, 0.5, 0.5, 1.0),
        ]);
        assert_eq!(clipper.clip_polygons(&[behind, visible.clone()]), vec![visible]);
    }
}
