//! Shared render state for one application run.
//!
//! The camera, light and viewport are shared by every scene. They live here,
//! passed by reference into the pipeline, and change only through the
//! setters below. The near-plane guard moves the camera, so rendering takes
//! `&mut RenderContext` and stays on one thread.

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::light::Light;
use crate::math::Vec3;
use crate::viewport::Viewport;

/// Restarts allowed within one `render()` call before it fails.
pub const DEFAULT_MAX_RETRIES: u32 = 16;

#[derive(Debug, Clone)]
pub struct RenderContext {
    camera: Camera,
    light: Light,
    viewport: Viewport,
    animation_enabled: bool,
    max_retries: u32,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Camera::default(), Light::default(), Viewport::default())
    }
}

impl RenderContext {
    pub fn new(camera: Camera, light: Light, viewport: Viewport) -> Self {
        Self {
            camera,
            light,
            viewport,
            animation_enabled: false,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Builds the context a configuration describes. Does not validate it.
    pub fn from_config(config: &RenderConfig) -> Self {
        let c = &config.camera;
        let camera = Camera::new(c.position)
            .with_yaw(c.yaw_degrees.to_radians())
            .with_near_plane(c.near_plane)
            .with_step(c.step);

        let l = &config.light;
        let light = Light::new(l.direction).with_intensity(l.ambient, l.diffuse);

        let v = &config.viewport;
        let viewport = Viewport::new(v.width, v.height).with_window(
            v.viewport_width,
            v.viewport_height,
            v.distance,
        );

        let mut context = Self::new(camera, light, viewport);
        context.set_animation_enabled(config.render.animate);
        context.set_max_retries(config.render.max_retries);
        context
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn light(&self) -> &Light {
        &self.light
    }

    pub fn set_light_direction(&mut self, direction: Vec3) {
        self.light.set_direction(direction);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
    }

    pub fn animation_enabled(&self) -> bool {
        self.animation_enabled
    }

    pub fn set_animation_enabled(&mut self, enabled: bool) {
        self.animation_enabled = enabled;
    }

    pub fn toggle_animation(&mut self) -> bool {
        self.animation_enabled = !self.animation_enabled;
        self.animation_enabled
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn set_max_retries(&mut self, max_retries: u32) {
        self.max_retries = max_retries;
    }
}
