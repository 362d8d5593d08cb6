//! Scanline z-buffer polygon fill.
//!
//! Every polygon is filled over its screen bounding box, one row at a time:
//!
//! 1. **Plane**: `A·x + B·y + C·z + D = 0` from the unit normal and the
//!    first vertex. Polygons seen edge-on (`C = 0`) cover no pixels.
//! 2. **Depth**: solved once per row at the left edge of the box, then
//!    stepped by `-A/C` per pixel.
//! 3. **Coverage**: a pixel is inside when the z component of
//!    `edge × (pixel - edge start)` has the sign of the normal's z for every
//!    edge, which works for either winding.
//! 4. **Visibility**: the depth test in [`FrameView::set_pixel_with_depth`],
//!    checked with [`FrameView::is_closer`] before the edge test.
//!
//! The box is clamped to the rows and columns of the target view, so
//! polygons hanging off the frame are safe and a band only visits its own
//! rows.

use log::trace;

use super::Rasterizer;
use crate::polygon::ShadedPolygon;
use crate::render::framebuffer::{FrameBuffer, FrameView};

/// Serial scanline rasterizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanlineRasterizer;

impl ScanlineRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for ScanlineRasterizer {
    fn fill_polygons(&self, polygons: &[ShadedPolygon], buffer: &mut FrameBuffer) {
        let mut view = buffer.view_mut();
        for polygon in polygons {
            fill_polygon(polygon, &mut view);
        }
    }
}

/// Fills one screen-space polygon into `view`. Returns the number of pixels
/// that passed the depth test.
pub(crate) fn fill_polygon(shaded: &ShadedPolygon, view: &mut FrameView) -> usize {
    let polygon = &shaded.polygon;
    if polygon.is_degenerate() {
        return 0;
    }
    let Some(plane) = polygon.plane() else {
        trace!("skipping polygon without a plane: {:?}", polygon.vertices);
        return 0;
    };
    if plane.c.abs() <= f64::EPSILON {
        return 0;
    }

    let (min_x, max_x) = extent(shaded, 0);
    let (min_y, max_y) = extent(shaded, 1);
    let x_start = clamp_to(min_x.trunc(), 0, view.width() as i32);
    let x_end = clamp_to(max_x.ceil(), 0, view.width() as i32);
    let y_start = clamp_to(min_y.trunc(), view.y_start() as i32, view.y_end() as i32);
    let y_end = clamp_to(max_y.ceil(), view.y_start() as i32, view.y_end() as i32);

    let color = shaded.color.to_argb();
    let dz = plane.depth_step_x();
    let mut written = 0;
    for y in y_start..y_end {
        let Some(mut z) = plane.depth_at(x_start as f64, y as f64) else {
            return written;
        };
        for x in x_start..x_end {
            if view.is_closer(x, y, z)
                && covers(shaded, x as f64, y as f64, plane.c)
                && view.set_pixel_with_depth(x, y, z, color)
            {
                written += 1;
            }
            z += dz;
        }
    }
    written
}

fn extent(shaded: &ShadedPolygon, component: usize) -> (f64, f64) {
    shaded
        .polygon
        .vertices
        .iter()
        .map(|v| v[component])
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c), hi.max(c))
        })
}

fn clamp_to(value: f64, lo: i32, hi: i32) -> i32 {
    value.clamp(lo as f64, hi as f64) as i32
}

/// Edge test against every edge, signed by the normal's z.
#[inline]
fn covers(shaded: &ShadedPolygon, x: f64, y: f64, normal_z: f64) -> bool {
    shaded.polygon.edges().all(|(start, end)| {
        let (ex, ey) = (end.x() - start.x(), end.y() - start.y());
        let cross = ex * (y - start.y()) - ey * (x - start.x());
        cross * normal_z >= 0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Color, BLACK};
    use crate::math::Vec4;
    use crate::polygon::Polygon;

    const RED: Color = Color::new(1.0, 0.0, 0.0);
    const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64, z: f64, color: Color) -> ShadedPolygon {
        ShadedPolygon::new(
            Polygon::new(vec![
                Vec4::point(x0, y0, z),
                Vec4::point(x1, y0, z),
                Vec4::point(x1, y1, z),
                Vec4::point(x0, y1, z),
            ]),
            color,
        )
    }

    fn count(fb: &FrameBuffer, color: Color) -> usize {
        let argb = color.to_argb();
        fb.color_buffer().iter().filter(|&&c| c == argb).count()
    }

    #[test]
    fn fills_half_open_bounding_box() {
        let mut fb = FrameBuffer::new(10, 10, BLACK).unwrap();
        let written = fill_polygon(&rect(1.0, 1.0, 5.0, 5.0, 0.5, RED), &mut fb.view_mut());
        assert_eq!(written, 16);
        assert_eq!(fb.get_pixel(1, 1), Some(RED.to_argb()));
        assert_eq!(fb.get_pixel(4, 4), Some(RED.to_argb()));
        assert_eq!(fb.get_pixel(5, 5), Some(BLACK));
        assert_eq!(fb.get_depth(2, 3), Some(0.5));
    }

    #[test]
    fn either_winding_is_filled() {
        let mut fb = FrameBuffer::new(10, 10, BLACK).unwrap();
        let mut clockwise = rect(1.0, 1.0, 5.0, 5.0, 0.5, RED);
        clockwise.polygon.vertices.reverse();
        assert_eq!(fill_polygon(&clockwise, &mut fb.view_mut()), 16);
    }

    #[test]
    fn triangle_coverage_excludes_outside_corner() {
        let mut fb = FrameBuffer::new(10, 10, BLACK).unwrap();
        let tri = ShadedPolygon::new(
            Polygon::new(vec![
                Vec4::point(0.0, 0.0, 0.5),
                Vec4::point(8.0, 0.0, 0.5),
                Vec4::point(0.0, 8.0, 0.5),
            ]),
            RED,
        );
        fill_polygon(&tri, &mut fb.view_mut());
        assert_eq!(fb.get_pixel(1, 1), Some(RED.to_argb()));
        assert_eq!(fb.get_pixel(4, 4), Some(RED.to_argb()));
        assert_eq!(fb.get_pixel(6, 6), Some(BLACK));
    }

    #[test]
    fn nearer_polygon_wins_regardless_of_order() {
        let near = rect(2.0, 2.0, 8.0, 8.0, 0.2, RED);
        let far = rect(0.0, 0.0, 6.0, 6.0, 0.7, BLUE);

        for order in [[&near, &far], [&far, &near]] {
            let mut fb = FrameBuffer::new(10, 10, BLACK).unwrap();
            let polygons: Vec<ShadedPolygon> = order.iter().map(|&p| p.clone()).collect();
            ScanlineRasterizer::new().fill_polygons(&polygons, &mut fb);
            assert_eq!(fb.get_pixel(3, 3), Some(RED.to_argb()));
            assert_eq!(fb.get_pixel(1, 1), Some(BLUE.to_argb()));
            assert_eq!(count(&fb, RED), 36);
        }
    }

    #[test]
    fn hidden_polygon_writes_nothing() {
        let mut fb = FrameBuffer::new(10, 10, BLACK).unwrap();
        let mut view = fb.view_mut();
        assert_eq!(fill_polygon(&rect(0.0, 0.0, 10.0, 10.0, 0.2, RED), &mut view), 100);
        assert_eq!(fill_polygon(&rect(2.0, 2.0, 6.0, 6.0, 0.7, BLUE), &mut view), 0);
        assert_eq!(count(&fb, RED), 100);
    }

    #[test]
    fn depth_interpolates_across_sloped_polygon() {
        let mut fb = FrameBuffer::new(10, 10, BLACK).unwrap();
        let sloped = ShadedPolygon::new(
            Polygon::new(vec![
                Vec4::point(0.0, 0.0, 0.0),
                Vec4::point(8.0, 0.0, 0.8),
                Vec4::point(8.0, 8.0, 0.8),
                Vec4::point(0.0, 8.0, 0.0),
            ]),
            RED,
        );
        fill_polygon(&sloped, &mut fb.view_mut());
        approx::assert_relative_eq!(fb.get_depth(5, 3).unwrap(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn polygon_larger_than_frame_is_clamped() {
        let mut fb = FrameBuffer::new(6, 4, BLACK).unwrap();
        let written = fill_polygon(&rect(-50.0, -50.0, 200.0, 200.0, 0.5, RED), &mut fb.view_mut());
        assert_eq!(written, 24);
        assert_eq!(count(&fb, RED), 24);
    }

    #[test]
    fn polygon_off_frame_writes_nothing() {
        let mut fb = FrameBuffer::new(6, 4, BLACK).unwrap();
        let written = fill_polygon(&rect(20.0, 20.0, 30.0, 30.0, 0.5, RED), &mut fb.view_mut());
        assert_eq!(written, 0);
    }

    #[test]
    fn edge_on_polygon_covers_nothing() {
        let mut fb = FrameBuffer::new(6, 6, BLACK).unwrap();
        let edge_on = ShadedPolygon::new(
            Polygon::new(vec![
                Vec4::point(1.0, 1.0, 0.1),
                Vec4::point(4.0, 1.0, 0.1),
                Vec4::point(4.0, 1.0, 0.9),
            ]),
            RED,
        );
        assert_eq!(fill_polygon(&edge_on, &mut fb.view_mut()), 0);
    }
}
