//! Line and outline drawing.
//!
//! Integer Bresenham for every octant. Lines are always walked left to
//! right; a falling line is mirrored about its start row so the loop only
//! ever sees rising slopes, and a steep line swaps the roles of x and y.
//! Mirroring back when emitting makes `line(a, b)` and `line(b, a)` produce
//! the same pixels.

use crate::math::Vec4;
use crate::polygon::Polygon;
use crate::render::framebuffer::FrameView;

/// Pixels of the segment between two points, rounded to the nearest pixel.
///
/// Emitted left to right (bottom to top for vertical lines), gap free.
pub fn bresenham(from: (f64, f64), to: (f64, f64)) -> Vec<(i32, i32)> {
    let mut a = (from.0.round() as i32, from.1.round() as i32);
    let mut b = (to.0.round() as i32, to.1.round() as i32);
    if b.0 < a.0 || (b.0 == a.0 && b.1 < a.1) {
        std::mem::swap(&mut a, &mut b);
    }
    let (mut x1, mut y1) = a;
    let (mut x2, mut y2) = b;

    // mirror a falling line about y1
    let falling = y1 > y2;
    if falling {
        y2 += 2 * (y1 - y2);
    }
    let steep = (y2 - y1) > (x2 - x1);
    if steep {
        std::mem::swap(&mut x1, &mut y1);
        std::mem::swap(&mut x2, &mut y2);
    }

    let emit = |x: i32, y: i32| match (steep, falling) {
        (false, false) => (x, y),
        (false, true) => (x, 2 * y1 - y),
        (true, false) => (y, x),
        (true, true) => (y, 2 * x1 - x),
    };

    let dy = y2 - y1;
    let dx = x2 - x1;
    let mut pixels = Vec::with_capacity(dx as usize + 1);
    let (mut x, mut y) = (x1, y1);
    let mut d = 2 * dy - dx;
    pixels.push(emit(x, y));
    while x < x2 {
        if d <= 0 {
            d += 2 * dy;
        } else {
            d += 2 * (dy - dx);
            y += 1;
        }
        x += 1;
        pixels.push(emit(x, y));
    }
    pixels
}

/// Draws a segment without depth testing.
pub fn draw_line(view: &mut FrameView, from: (f64, f64), to: (f64, f64), color: u32) {
    for (x, y) in bresenham(from, to) {
        view.set_pixel(x, y, color);
    }
}

/// Draws every edge of a closed outline, including the closing edge.
pub fn draw_outline(view: &mut FrameView, points: &[(f64, f64)], color: u32) {
    let n = points.len();
    for i in 0..n {
        draw_line(view, points[i], points[(i + 1) % n], color);
    }
}

/// Outline of a screen-space polygon. Empty polygons draw nothing.
pub fn draw_polygon_outline(view: &mut FrameView, polygon: &Polygon<4>, color: u32) {
    let points: Vec<(f64, f64)> = polygon.vertices.iter().map(Vec4::xy).collect();
    draw_outline(view, &points, color);
}
