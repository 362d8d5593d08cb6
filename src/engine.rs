//! Core rendering engine.
//!
//! The [`Engine`] turns a [`Scene`] snapshot into a finished [`FrameBuffer`]
//! by running the stages in [`crate::render::pipeline`] and handing the
//! result to the active rasterizer.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, info};

use crate::clipper::WindowClipper;
use crate::colors;
use crate::error::RenderError;
use crate::math::Vec3;
use crate::polygon::Polygon;
use crate::render::pipeline;
use crate::render::rasterizer::line::{draw_outline, draw_polygon_outline};
use crate::render::{FrameBuffer, FrameView, Rasterizer, RasterizerDispatcher};
use crate::scene::Scene;
use crate::shading::Illumination;
use crate::transform::transform_polygons;
use crate::viewport::{PixelRect, Window2d};

pub use crate::render::rasterizer::{RasterizerType, DEFAULT_TILE_ROWS};

/// Polygon count above which transforms run on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// What a frame shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Flat-shaded, depth-tested polygons.
    #[default]
    Filled,
    /// Viewport border and polygon outlines only.
    Wireframe,
    /// Outlines drawn over the filled polygons.
    FilledWireframe,
}

impl RenderMode {
    fn layers(self) -> (bool, bool) {
        match self {
            RenderMode::Filled => (true, false),
            RenderMode::Wireframe => (false, true),
            RenderMode::FilledWireframe => (true, true),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Filled => write!(f, "filled"),
            RenderMode::Wireframe => write!(f, "wireframe"),
            RenderMode::FilledWireframe => write!(f, "filled-wireframe"),
        }
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "filled" => Ok(Self::Filled),
            "wireframe" => Ok(Self::Wireframe),
            "filled-wireframe" => Ok(Self::FilledWireframe),
            other => Err(format!(
                "unknown render mode `{other}`, expected `filled`, `wireframe` or `filled-wireframe`"
            )),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub rasterizer: RasterizerType,
    /// Cull back faces even when the scene does not ask for it.
    pub backface_culling: bool,
    pub wireframe_color: u32,
    pub parallel_threshold: usize,
    /// Band height for [`RasterizerType::Tiled`].
    pub tile_rows: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            rasterizer: RasterizerType::default(),
            backface_culling: false,
            wireframe_color: colors::WIREFRAME,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            tile_rows: DEFAULT_TILE_ROWS,
        }
    }
}

pub struct Engine {
    options: RenderOptions,
    rasterizer: RasterizerDispatcher,
}

impl Engine {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            rasterizer: RasterizerDispatcher::new(options.rasterizer, options.tile_rows),
            options,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.options.mode = mode;
    }

    pub fn render_mode(&self) -> RenderMode {
        self.options.mode
    }

    pub fn set_rasterizer(&mut self, rasterizer_type: RasterizerType) {
        self.options.rasterizer = rasterizer_type;
        self.rasterizer.set_type(rasterizer_type);
    }

    pub fn rasterizer(&self) -> RasterizerType {
        self.rasterizer.active_type()
    }

    /// Renders one frame of `scene` into a fresh buffer sized to the
    /// scene's window.
    pub fn render(&self, scene: &Scene) -> Result<FrameBuffer, RenderError> {
        let start = Instant::now();

        let (width, height) = scene.viewport.window_size();
        let mut frame = FrameBuffer::new(width, height, scene.background.to_argb())?;
        let view_projection = scene
            .observer
            .view_projection(scene.viewport.aspect_ratio())?;
        let to_screen = scene.viewport.to_screen();
        let cull = self.options.backface_culling || scene.cull_back_faces;
        let (draw_filled, draw_wireframe) = self.options.mode.layers();

        if draw_filled {
            let illumination = Illumination {
                ambient: scene.ambient,
                lights: scene.lights,
                eye: scene.observer.eye(),
            };
            let shaded = pipeline::shade(scene.models, &illumination);
            let projected = pipeline::project_clip_divide(&shaded, &view_projection);
            let clipped_count = projected.len();
            let visible = if cull {
                pipeline::cull_back_faces(projected)
            } else {
                projected
            };
            let screen = pipeline::to_screen(&visible, &to_screen, self.options.parallel_threshold);
            debug!(
                "filled: {} shaded, {} after clipping, {} to rasterize with {}",
                shaded.len(),
                clipped_count,
                screen.len(),
                self.rasterizer.active_type()
            );
            self.rasterizer.fill_polygons(&screen, &mut frame);
        }

        if draw_wireframe {
            let outlines: Vec<Polygon<4>> = scene.models.iter().flat_map(|model| model.polygons()).collect();
            let mut projected = pipeline::project_clip_divide_outlines(&outlines, &view_projection);
            if cull {
                projected.retain(|polygon| !pipeline::is_back_face(polygon));
            }
            let screen = transform_polygons(&to_screen, &projected, self.options.parallel_threshold);
            debug!("wireframe: {} of {} outlines visible", screen.len(), outlines.len());

            let color = self.options.wireframe_color;
            let mut view = frame.view_mut();
            draw_outline(&mut view, &scene.viewport.borders().corners(), color);
            for polygon in &screen {
                draw_polygon_outline(&mut view, polygon, color);
            }
        }

        info!("display takes {} ms", start.elapsed().as_millis());
        Ok(frame)
    }
}

/// Draws a 2D view: a white border around `viewport`, then every polygon
/// clipped to `window` and mapped onto `viewport` in the wireframe colour.
pub fn draw_window_view(
    frame: &mut FrameBuffer,
    polygons: &[Polygon<3>],
    window: &Window2d,
    viewport: &PixelRect,
) {
    let start = Instant::now();
    let clipped = WindowClipper::new(window).clip_polygons(polygons);
    let mapped = transform_polygons(
        &window.to_viewport(viewport),
        &clipped,
        DEFAULT_PARALLEL_THRESHOLD,
    );

    let mut view = frame.view_mut();
    draw_outline(&mut view, &viewport.corners(), colors::WHITE);
    for polygon in &mapped {
        draw_outline_2d(&mut view, polygon, colors::WIREFRAME);
    }
    info!("draw takes {} us", start.elapsed().as_micros());
}

fn draw_outline_2d(view: &mut FrameView, polygon: &Polygon<3>, color: u32) {
    let points: Vec<(f64, f64)> = polygon.vertices.iter().map(|v: &Vec3| (v.x(), v.y())).collect();
    draw_outline(view, &points, color);
}
