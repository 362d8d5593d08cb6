//! Frame production: buffers, rasterizers and the per-frame pipeline stages.

pub mod framebuffer;
pub mod pipeline;
pub mod rasterizer;

pub use framebuffer::{FrameBuffer, FrameView, MAX_DIMENSION};
pub use rasterizer::{
    Rasterizer, RasterizerDispatcher, RasterizerType, ScanlineRasterizer, TiledRasterizer,
};
