//! Screen-space rendering: triangles, clipping, scanline fill, and the
//! per-frame orchestrator that produces the triangles.

mod canvas;
mod clip;
mod framebuffer;
mod orchestrator;
mod rasterizer;
mod triangle;

pub use canvas::Canvas;
pub use framebuffer::FrameBuffer;
pub use orchestrator::{FrameOutcome, Render, RenderObject, RenderState};
pub use rasterizer::{Rasterizer, ScanlineRasterizer};
pub use triangle::{Span, Triangle};
