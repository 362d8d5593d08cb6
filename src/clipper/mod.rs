//! Polygon clipping against convex volumes.
//!
//! Both clippers share the Sutherland-Hodgman skeleton in [`clip_against`]:
//! a polygon is clipped against one boundary at a time, and the output of one
//! boundary is the input of the next.
//!
//! - [`window`]: 2D axis-aligned window (right, top, left, bottom edges).
//! - [`clip_space`]: the six homogeneous planes of the view volume, applied
//!   after projection and before the perspective divide.

pub mod clip_space;
pub mod window;

use crate::math::Vector;
use crate::polygon::Polygon;

pub use clip_space::{ClipPlane, ClipSpaceClipper};
pub use window::{WindowClipper, WindowEdge};

/// One convex half-space boundary.
pub trait ClipBoundary<const N: usize> {
    /// Positive or zero inside, negative outside.
    fn signed_distance(&self, v: &Vector<N>) -> f64;

    /// Point where the edge `s -> p` crosses the boundary.
    ///
    /// Only called when `s` and `p` lie on opposite sides.
    fn intersect(&self, s: &Vector<N>, p: &Vector<N>) -> Vector<N> {
        let c1 = self.signed_distance(s);
        let c2 = self.signed_distance(p);
        s.lerp(*p, c1 / (c1 - c2))
    }
}

/// Clips `polygon` against a single boundary.
///
/// Walks every edge `s -> p` (including the closing edge, so the first `s` is
/// the last vertex):
/// - inside to inside: emit `p`
/// - inside to outside: emit the crossing point
/// - outside to inside: emit the crossing point, then `p`
/// - outside to outside: emit nothing
pub fn clip_against<const N: usize, B>(polygon: &Polygon<N>, boundary: &B) -> Polygon<N>
where
    B: ClipBoundary<N> + ?Sized,
{
    let Some(&last) = polygon.vertices.last() else {
        return Polygon::default();
    };

    let mut output = Vec::with_capacity(polygon.len() + 2);
    let mut s = last;
    let mut s_inside = boundary.signed_distance(&s) >= 0.0;

    for &p in &polygon.vertices {
        let p_inside = boundary.signed_distance(&p) >= 0.0;
        match (s_inside, p_inside) {
            (true, true) => output.push(p),
            (true, false) => output.push(boundary.intersect(&s, &p)),
            (false, true) => {
                output.push(boundary.intersect(&s, &p));
                output.push(p);
            }
            (false, false) => {}
        }
        s = p;
        s_inside = p_inside;
    }

    Polygon::new(output)
}

/// Clips `polygon` against every boundary in order.
///
/// Returns `None` when nothing drawable (three or more vertices) remains.
pub fn clip_against_all<const N: usize, B>(polygon: &Polygon<N>, boundaries: &[B]) -> Option<Polygon<N>>
where
    B: ClipBoundary<N>,
{
    let mut result = polygon.clone();
    for boundary in boundaries {
        if result.is_degenerate() {
            break;
        }
        result = clip_against(&result, boundary);
    }
    (!result.is_degenerate()).then_some(result)
}
