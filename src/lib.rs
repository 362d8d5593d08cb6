//! A CPU software 3D graphics pipeline.
//!
//! Scenes are described by small command scripts (see [`scene`]). Each
//! `display` command runs the full pipeline on the CPU: model transforms,
//! viewing and perspective projection, six-plane clipping in homogeneous
//! clip space, perspective division, flat Phong shading and a scanline
//! z-buffer rasterizer. Frames land in an owned [`FrameBuffer`] that can be
//! written to PNG or, with the `window` feature, shown in an SDL2 window.
//!
//! # Quick Start
//!
//! ```ignore
//! use scanline3d::prelude::*;
//!
//! let script = Script::load(Path::new("scene.in"))?;
//! let meshes = FileMeshSource::new(vec!["assets".into()]);
//! let engine = Engine::new(RenderOptions::default());
//! run(&script, &meshes, |frame, scene| {
//!     let path = PathBuf::from(format!("frame_{frame:03}.png"));
//!     engine.render(scene)?.save_png(&path)?;
//!     Ok(ControlFlow::Continue(()))
//! })?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod clipper;
pub mod colors;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod model;
pub mod polygon;
pub mod projection;
pub mod render;
pub mod scene;
pub mod shading;
pub mod transform;
pub mod viewport;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use engine::{Engine, RasterizerType, RenderMode, RenderOptions};
pub use error::{Error, Result};
pub use mesh::{FileMeshSource, Mesh, MeshSource};
pub use model::Model;
pub use projection::Projection;
pub use render::FrameBuffer;
pub use scene::{run, Scene, SceneState, Script};
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use scanline3d::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::Observer;

    // Engine
    pub use crate::engine::{Engine, RasterizerType, RenderMode, RenderOptions};

    // Errors
    pub use crate::error::{Error, Result};

    // Scene
    pub use crate::light::{Ambient, Material, PointLight};
    pub use crate::mesh::{FileMeshSource, Mesh, MeshSource};
    pub use crate::model::Model;
    pub use crate::scene::{run, Command, Scene, SceneState, Script, Step};

    // Projection
    pub use crate::projection::Projection;
    pub use crate::viewport::Viewport;

    // Transform
    pub use crate::transform::Transform;

    // Math
    pub use crate::colors::Color;
    pub use crate::math::{Mat3, Mat4, Vec3, Vec4};

    // Rendering
    pub use crate::render::FrameBuffer;

    // Window
    #[cfg(feature = "window")]
    pub use crate::window::{Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::clipper::ClipSpaceClipper;
    pub use crate::colors::Color;
    pub use crate::polygon::{Polygon, ShadedPolygon};
    pub use crate::render::{FrameBuffer, Rasterizer, ScanlineRasterizer, TiledRasterizer};
}
