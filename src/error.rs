//! Error types for the pipeline.
//!
//! One enum per subsystem, folded into [`Error`] with `#[from]` conversions:
//! - [`GeometryError`]: degenerate camera setups
//! - [`MeshError`]: mesh file loading and validation
//! - [`SceneError`]: scene script parsing and interpretation
//! - [`RenderError`]: failures while producing a frame
//!
//! Empty polygons after clipping are not errors; the pipeline drops them.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using the crate-wide [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a frame to an image file failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// SDL2 reports errors as plain strings.
    #[cfg(feature = "window")]
    #[error("window error: {0}")]
    Window(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The view direction is zero or parallel to the world up axis, so no
    /// camera basis exists.
    #[error("view direction is degenerate (eye coincides with center of interest or looks straight up/down)")]
    DegenerateView,
}

#[derive(Error, Debug)]
pub enum MeshError {
    #[error("cannot read mesh file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("mesh file {path} is truncated: expected {expected} {what}, found {found}")]
    Truncated {
        path: PathBuf,
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("mesh file {path}, line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A face references a vertex that does not exist (indices are 1-based).
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("face {face} has {arity} vertices, at least 3 are required")]
    FaceTooSmall { face: usize, arity: usize },

    #[error("cannot load OBJ file {path}: {message}")]
    Obj { path: PathBuf, message: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Unrecognized directive. Scripts are interpreted strictly.
    #[error("line {line}: unknown command `{keyword}`")]
    UnknownCommand { line: usize, keyword: String },

    #[error("line {line}: `{command}` expects {expected} arguments")]
    MissingArgument {
        line: usize,
        command: &'static str,
        expected: usize,
    },

    #[error("line {line}: `{token}` is not a valid number")]
    InvalidNumber { line: usize, token: String },

    /// Lights are numbered from 1.
    #[error("line {line}: light index must be at least 1")]
    InvalidLightIndex { line: usize },

    #[error("line {line}: invalid window size, expected `<width> <height>`")]
    InvalidWindowSize { line: usize },

    /// `display` was reached before the scene was fully described.
    #[error("cannot display: no {what} has been set")]
    MissingState { what: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("viewport has zero area")]
    EmptyViewport,

    #[error("framebuffer dimensions {width}x{height} are invalid")]
    InvalidFramebuffer { width: u32, height: u32 },
}
