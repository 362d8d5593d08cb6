//! Polygon rasterization.
//!
//! Filled polygons go through a [`Rasterizer`]; two implementations can be
//! swapped at runtime for testing and benchmarking:
//! - [`ScanlineRasterizer`]: serial z-buffer scan over each polygon's box
//! - [`TiledRasterizer`]: the same scan, with the frame split into bands
//!   filled in parallel
//!
//! Wireframe output uses the Bresenham drawer in [`line`].

pub mod line;
mod scanline;
mod tiled;

pub use scanline::ScanlineRasterizer;
pub use tiled::{TiledRasterizer, DEFAULT_TILE_ROWS};

use std::fmt;
use std::str::FromStr;

use super::framebuffer::FrameBuffer;
use crate::polygon::ShadedPolygon;

/// Fills screen-space polygons into a frame with depth testing.
///
/// Polygons must already be clipped, divided and mapped to pixels; depth is
/// their z.
pub trait Rasterizer {
    fn fill_polygons(&self, polygons: &[ShadedPolygon], buffer: &mut FrameBuffer);
}

/// Available rasterization strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterizerType {
    /// One thread scans every polygon.
    #[default]
    Scanline,
    /// Disjoint row bands filled on the rayon pool.
    Tiled,
}

impl fmt::Display for RasterizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterizerType::Scanline => write!(f, "scanline"),
            RasterizerType::Tiled => write!(f, "tiled"),
        }
    }
}

impl FromStr for RasterizerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scanline" => Ok(Self::Scanline),
            "tiled" => Ok(Self::Tiled),
            other => Err(format!(
                "unknown rasterizer `{other}`, expected `scanline` or `tiled`"
            )),
        }
    }
}

/// Holds both rasterizers and forwards to the active one.
#[derive(Debug, Clone, Copy)]
pub struct RasterizerDispatcher {
    scanline: ScanlineRasterizer,
    tiled: TiledRasterizer,
    active: RasterizerType,
}

impl RasterizerDispatcher {
    pub fn new(rasterizer_type: RasterizerType, tile_rows: u32) -> Self {
        Self {
            scanline: ScanlineRasterizer::new(),
            tiled: TiledRasterizer::new(tile_rows),
            active: rasterizer_type,
        }
    }

    pub fn set_type(&mut self, rasterizer_type: RasterizerType) {
        self.active = rasterizer_type;
    }

    pub fn active_type(&self) -> RasterizerType {
        self.active
    }
}

impl Rasterizer for RasterizerDispatcher {
    #[inline]
    fn fill_polygons(&self, polygons: &[ShadedPolygon], buffer: &mut FrameBuffer) {
        match self.active {
            RasterizerType::Scanline => self.scanline.fill_polygons(polygons, buffer),
            RasterizerType::Tiled => self.tiled.fill_polygons(polygons, buffer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasterizer_type_round_trips_through_strings() {
        for ty in [RasterizerType::Scanline, RasterizerType::Tiled] {
            assert_eq!(ty.to_string().parse::<RasterizerType>(), Ok(ty));
        }
        assert_eq!("TILED".parse::<RasterizerType>(), Ok(RasterizerType::Tiled));
        assert!("edge".parse::<RasterizerType>().is_err());
    }

    #[test]
    fn dispatcher_switches_active_type() {
        let mut dispatcher = RasterizerDispatcher::new(RasterizerType::Scanline, 8);
        dispatcher.set_type(RasterizerType::Tiled);
        assert_eq!(dispatcher.active_type(), RasterizerType::Tiled);
    }
}
