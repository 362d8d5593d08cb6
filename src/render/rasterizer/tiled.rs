//! Band-parallel z-buffer fill.
//!
//! The frame is split into disjoint horizontal bands. Each rayon task owns
//! one band, walks the full polygon list and writes only its own rows, so no
//! two threads ever touch the same pixel and no locking is needed. The result
//! is identical to [`ScanlineRasterizer`](super::ScanlineRasterizer).

use rayon::prelude::*;

use super::scanline::fill_polygon;
use super::Rasterizer;
use crate::polygon::ShadedPolygon;
use crate::render::framebuffer::FrameBuffer;

/// Default band height in rows.
pub const DEFAULT_TILE_ROWS: u32 = 16;

#[derive(Debug, Clone, Copy)]
pub struct TiledRasterizer {
    rows_per_band: u32,
}

impl TiledRasterizer {
    pub fn new(rows_per_band: u32) -> Self {
        Self {
            rows_per_band: rows_per_band.max(1),
        }
    }

    pub fn rows_per_band(&self) -> u32 {
        self.rows_per_band
    }
}

impl Default for TiledRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_ROWS)
    }
}

impl Rasterizer for TiledRasterizer {
    fn fill_polygons(&self, polygons: &[ShadedPolygon], buffer: &mut FrameBuffer) {
        buffer
            .bands_mut(self.rows_per_band)
            .into_par_iter()
            .for_each(|mut band| {
                for polygon in polygons {
                    fill_polygon(polygon, &mut band);
                }
            });
    }
}
