//! Viewport and window mappings.
//!
//! A [`Viewport`] selects a sub-rectangle of the output window in normalized
//! device coordinates (`[-1, 1]` on both axes) and maps NDC to pixels.
//! A [`Window2d`] is the logical window of the 2D pipeline, mapped onto a
//! pixel rectangle.

use crate::error::RenderError;
use crate::math::{Mat3, Mat4};

/// Axis-aligned rectangle in pixel coordinates, y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl PixelRect {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Corners counter-clockwise from bottom-left.
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.left, self.bottom),
            (self.right, self.bottom),
            (self.right, self.top),
            (self.left, self.top),
        ]
    }
}

/// NDC sub-rectangle of a window of `window_width` x `window_height` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    vxl: f64,
    vxr: f64,
    vyb: f64,
    vyt: f64,
    window_width: u32,
    window_height: u32,
}

impl Viewport {
    /// Fails with [`RenderError::EmptyViewport`] when the rectangle has no
    /// area.
    pub fn new(
        vxl: f64,
        vxr: f64,
        vyb: f64,
        vyt: f64,
        window_width: u32,
        window_height: u32,
    ) -> Result<Self, RenderError> {
        if !(vxr > vxl && vyt > vyb) || window_width == 0 || window_height == 0 {
            return Err(RenderError::EmptyViewport);
        }
        Ok(Self {
            vxl,
            vxr,
            vyb,
            vyt,
            window_width,
            window_height,
        })
    }

    /// Width over height, measured in NDC units.
    pub fn aspect_ratio(&self) -> f64 {
        (self.vxr - self.vxl) / (self.vyt - self.vyb)
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Pixel borders, each edge rounded to the nearest pixel.
    pub fn borders(&self) -> PixelRect {
        let w = self.window_width as f64;
        let h = self.window_height as f64;
        let to_pixel = |v: f64, extent: f64| ((1.0 + v) * extent / 2.0).round();
        PixelRect::new(
            to_pixel(self.vxl, w),
            to_pixel(self.vxr, w),
            to_pixel(self.vyb, h),
            to_pixel(self.vyt, h),
        )
    }

    /// Maps NDC `[-1, 1]²` onto the pixel borders. z passes through.
    pub fn to_screen(&self) -> Mat4 {
        let b = self.borders();
        Mat4::translation(b.left, b.bottom, 0.0)
            * Mat4::scaling(b.width() / 2.0, b.height() / 2.0, 1.0)
            * Mat4::translation(1.0, 1.0, 0.0)
    }
}

/// Logical clip window of the 2D pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window2d {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Window2d {
    pub fn new(left: f64, right: f64, bottom: f64, top: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Window to pixel rectangle mapping.
    pub fn to_viewport(&self, viewport: &PixelRect) -> Mat3 {
        Mat3::translation(viewport.left, viewport.bottom)
            * Mat3::scaling(
                viewport.width() / (self.right - self.left),
                viewport.height() / (self.top - self.bottom),
            )
            * Mat3::translation(-self.left, -self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Vec3, Vec4};
    use approx::assert_relative_eq;

    #[test]
    fn borders_round_to_pixels() {
        let vp = Viewport::new(-1.0, 1.0, -0.5, 0.5, 501, 400).unwrap();
        assert_eq!(vp.borders(), PixelRect::new(0.0, 501.0, 100.0, 300.0));
        let half = Viewport::new(0.0, 1.0, 0.0, 1.0, 501, 400).unwrap();
        // 250.5 rounds away from zero
        assert_eq!(half.borders().left, 251.0);
    }

    #[test]
    fn aspect_ratio_uses_ndc_extent() {
        let vp = Viewport::new(-1.0, 1.0, -0.5, 0.5, 800, 800).unwrap();
        assert_relative_eq!(vp.aspect_ratio(), 2.0);
    }

    #[test]
    fn to_screen_maps_ndc_corners_to_borders() {
        let vp = Viewport::new(-0.5, 0.5, -1.0, 0.0, 400, 200).unwrap();
        let m = vp.to_screen();
        let lo = m * Vec4::point(-1.0, -1.0, 0.3);
        let hi = m * Vec4::point(1.0, 1.0, 0.3);
        assert_relative_eq!(lo.x(), 100.0);
        assert_relative_eq!(lo.y(), 0.0);
        assert_relative_eq!(hi.x(), 300.0);
        assert_relative_eq!(hi.y(), 100.0);
        assert_relative_eq!(hi.z(), 0.3);
    }

    #[test]
    fn empty_viewport_is_rejected() {
        assert_eq!(
            Viewport::new(0.5, 0.5, -1.0, 1.0, 100, 100),
            Err(RenderError::EmptyViewport)
        );
        assert_eq!(
            Viewport::new(-1.0, 1.0, -1.0, 1.0, 0, 100),
            Err(RenderError::EmptyViewport)
        );
    }

    #[test]
    fn window_maps_onto_viewport_rect() {
        let window = Window2d::new(-1.0, 1.0, -1.0, 1.0);
        let m = window.to_viewport(&PixelRect::new(100.0, 700.0, 100.0, 500.0));
        assert_eq!(m * Vec3::new(-1.0, -1.0, 1.0), Vec3::new(100.0, 100.0, 1.0));
        assert_eq!(m * Vec3::new(1.0, 1.0, 1.0), Vec3::new(700.0, 500.0, 1.0));
        assert_eq!(m * Vec3::new(0.0, 0.0, 1.0), Vec3::new(400.0, 300.0, 1.0));
    }
}
