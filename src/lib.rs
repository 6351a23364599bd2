//! A CPU scanline rasterizer built around a model → camera → projection
//! pipeline.
//!
//! Each frame, [`Render::render`] composes every object's
//! `M_proj × M_cam × M_model`, projects its vertices to the raster and
//! returns the lit screen-space [`Triangle`]s in object order. A vertex that
//! lands inside the camera's near plane pushes the camera back and restarts
//! the frame. The triangles are then clipped and filled into a pixel buffer
//! by a [`Rasterizer`].
//!
//! # Quick Start
//!
//! ```ignore
//! use rastery::prelude::*;
//!
//! let mut ctx = RenderContext::default();
//! let mut render = Render::new();
//! render.insert_scene(
//!     Scene::new(ModelInstance::at(Vec3::new(0.0, 0.0, 6.0))),
//!     Model::cube(2.0, [0, 0, 255]),
//! );
//!
//! let triangles = render.render(&mut ctx)?;
//! let mut canvas = Canvas::new(ctx.viewport().width(), ctx.viewport().height());
//! ScanlineRasterizer::new().draw_frame(&triangles, &mut canvas.as_framebuffer());
//! canvas.save("frame.png")?;
//! ```

// Public API - exposed to library consumers
pub mod animation;
pub mod camera;
pub mod colors;
pub mod config;
pub mod context;
pub mod error;
pub mod light;
pub mod logging;
pub mod math;
pub mod model;
pub mod render;
pub mod scene;
pub mod transform;
pub mod viewport;
#[cfg(feature = "window")]
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use config::RenderConfig;
pub use context::RenderContext;
pub use error::RenderError;
pub use model::Model;
pub use render::{Canvas, Rasterizer, Render, ScanlineRasterizer, Triangle};
pub use scene::{Projected, Scene};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use rastery::prelude::*;
/// ```
pub mod prelude {
    // Pipeline state
    pub use crate::animation::{AnimationStep, Animator};
    pub use crate::camera::Camera;
    pub use crate::config::RenderConfig;
    pub use crate::context::RenderContext;
    pub use crate::error::RenderError;
    pub use crate::light::Light;
    pub use crate::viewport::Viewport;

    // Geometry
    pub use crate::model::Model;
    pub use crate::scene::Scene;
    pub use crate::transform::{ModelInstance, Transformable};

    // Math
    pub use crate::math::{Mat4, Vec3};

    // Rendering
    pub use crate::render::{Canvas, Rasterizer, Render, ScanlineRasterizer, Triangle};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{FrameBuffer, Rasterizer, ScanlineRasterizer, Triangle};
}
