//! Viewport projection and the raster it maps onto.
//!
//! The viewport is a `viewport_width x viewport_height` window placed at
//! distance `d` in front of the camera. Projecting a camera-space point onto
//! it and scaling to the `width x height` raster is
//!
//! ```text
//! screen_x = x * d * width  / viewport_width  / z
//! screen_y = y * d * height / viewport_height / z
//! ```
//!
//! The scale lives in [`Viewport::transformation`]; the divide by `z` happens
//! in [`crate::scene::Scene::project`]; [`Viewport::to_screen`] moves the
//! origin from the raster center to its top-left corner.

use crate::math::{Coord2D, Mat4, ScreenPoint};
use crate::transform::Transformable;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Raster width in pixels (W).
    width: u32,
    /// Raster height in pixels (H).
    height: u32,
    viewport_width: f32,
    viewport_height: f32,
    /// Distance from the camera to the projection plane.
    distance: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Viewport {
    /// A viewport one unit tall at distance 1 with the raster's aspect ratio.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            viewport_width: width as f32 / height.max(1) as f32,
            viewport_height: 1.0,
            distance: 1.0,
        }
    }

    pub fn with_window(mut self, viewport_width: f32, viewport_height: f32, distance: f32) -> Self {
        self.viewport_width = viewport_width;
        self.viewport_height = viewport_height;
        self.distance = distance;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Changes the raster size, keeping the viewport's aspect in step.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport_width = self.viewport_height * width as f32 / height.max(1) as f32;
        self.width = width;
        self.height = height;
    }

    /// Maps a centered, y-up coordinate to the y-down raster (truncating).
    pub fn to_screen(&self, coord: Coord2D) -> ScreenPoint {
        ScreenPoint::new(
            (self.width as f32 / 2.0 + coord.x) as i32,
            (self.height as f32 / 2.0 - coord.y) as i32,
        )
    }
}

impl Transformable for Viewport {
    fn transformation(&self) -> Mat4 {
        Mat4::scaling(
            self.distance * self.width as f32 / self.viewport_width,
            self.distance * self.height as f32 / self.viewport_height,
            1.0,
        )
    }
}
