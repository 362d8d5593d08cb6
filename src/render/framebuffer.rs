//! Colour and depth buffers.
//!
//! [`FrameBuffer`] owns both buffers for one rendered frame. Rasterizers
//! write through a [`FrameView`], a bounds-checked window onto a range of
//! rows, so disjoint bands can be handed to different threads.
//!
//! Rows are stored bottom-up: `y = 0` is the bottom row of the image, the
//! same orientation as the screen-space coordinates the pipeline produces.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::colors::unpack_rgba;
use crate::error::RenderError;

/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 16384;

/// Owned colour (ARGB8888) and depth buffers.
///
/// Depth starts at `+inf` and smaller values are closer.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    color: Vec<u32>,
    depth: Vec<f64>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// A cleared frame: every pixel `background`, every depth `+inf`.
    ///
    /// Each side must be between 1 and [`MAX_DIMENSION`] pixels.
    pub fn new(width: u32, height: u32, background: u32) -> Result<Self, RenderError> {
        if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
            return Err(RenderError::InvalidFramebuffer { width, height });
        }
        let len = width as usize * height as usize;
        Ok(Self {
            color: vec![background; len],
            depth: vec![f64::INFINITY; len],
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resets for a new frame.
    pub fn clear(&mut self, background: u32) {
        self.color.fill(background);
        self.depth.fill(f64::INFINITY);
    }

    pub fn color_buffer(&self) -> &[u32] {
        &self.color
    }

    pub fn depth_buffer(&self) -> &[f64] {
        &self.depth
    }

    /// Get the color at (x, y), or None if out of bounds.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.color[i])
    }

    /// Get the depth at (x, y), or None if out of bounds.
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f64> {
        self.index(x, y).map(|i| self.depth[i])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    /// A view covering the whole frame.
    pub fn view_mut(&mut self) -> FrameView<'_> {
        FrameView {
            color: &mut self.color,
            depth: &mut self.depth,
            width: self.width,
            y_start: 0,
            rows: self.height,
        }
    }

    /// Splits the frame into disjoint bands of `rows_per_band` rows (the last
    /// band may be shorter), bottom band first.
    pub fn bands_mut(&mut self, rows_per_band: u32) -> Vec<FrameView<'_>> {
        let rows_per_band = rows_per_band.clamp(1, self.height);
        let chunk = rows_per_band as usize * self.width as usize;
        let width = self.width;
        self.color
            .chunks_mut(chunk)
            .zip(self.depth.chunks_mut(chunk))
            .enumerate()
            .map(|(i, (color, depth))| FrameView {
                rows: (color.len() / width as usize) as u32,
                color,
                depth,
                width,
                y_start: i as u32 * rows_per_band,
            })
            .collect()
    }

    /// Converts to an RGBA image with the usual top-left origin.
    pub fn to_image(&self) -> RgbaImage {
        let (w, h) = (self.width, self.height);
        RgbaImage::from_fn(w, h, |x, y| {
            let row = (h - 1 - y) as usize;
            Rgba(unpack_rgba(self.color[row * w as usize + x as usize]))
        })
    }

    pub fn save_png(&self, path: &Path) -> Result<(), image::ImageError> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
    }
}

/// Mutable window onto rows `y_start..y_start + rows` of a frame.
///
/// Coordinates are frame coordinates; writes outside the window are
/// silently ignored.
pub struct FrameView<'a> {
    color: &'a mut [u32],
    depth: &'a mut [f64],
    width: u32,
    y_start: u32,
    rows: u32,
}

impl FrameView<'_> {
    pub fn width(&self) -> u32 {
        self.width
    }

    /// First frame row covered by this view.
    pub fn y_start(&self) -> u32 {
        self.y_start
    }

    /// One past the last frame row covered by this view.
    pub fn y_end(&self) -> u32 {
        self.y_start + self.rows
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < self.y_start as i32 || x >= self.width as i32 || y >= self.y_end() as i32 {
            return None;
        }
        Some((y as u32 - self.y_start) as usize * self.width as usize + x as usize)
    }

    /// Whether `depth` would pass the depth test at (x, y). Always false
    /// outside the view.
    #[inline]
    pub fn is_closer(&self, x: i32, y: i32, depth: f64) -> bool {
        self.index(x, y).is_some_and(|idx| depth < self.depth[idx])
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if `depth` is strictly less than the stored
    /// depth (closer to the eye). Returns whether it was written.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f64, color: u32) -> bool {
        match self.index(x, y) {
            Some(idx) if depth < self.depth[idx] => {
                self.depth[idx] = depth;
                self.color[idx] = color;
                true
            }
            _ => false,
        }
    }

    /// Set a pixel without depth testing (outlines, borders).
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(idx) = self.index(x, y) {
            self.color[idx] = color;
        }
    }
}
