//! Scene camera.
//!
//! # Coordinate System
//!
//! Left-handed camera space:
//! - X: positive right
//! - Y: positive up
//! - Z: positive forward (into the screen), so visible depth is `z > 0`
//!
//! The camera carries the near-plane distance `D` used by the projection
//! guard: a vertex at camera-space depth `z <= D` makes the camera back away
//! by `D - z + 1` and the frame is rebuilt (see [`crate::scene::Scene::project`]).

use crate::math::{Mat4, Vec3};
use crate::transform::Transformable;

pub const DEFAULT_NEAR_PLANE: f32 = 1.0;
pub const DEFAULT_STEP: f32 = 0.5;

/// Camera with a world position (the "offset"), a yaw angle and a near plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32, // radians around Y, positive looks right
    near_plane: f32,
    step: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Creates a camera at `position` looking along +Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            near_plane: DEFAULT_NEAR_PLANE,
            step: DEFAULT_STEP,
        }
    }

    pub fn with_near_plane(mut self, near_plane: f32) -> Self {
        self.near_plane = near_plane;
        self
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw;
        self
    }

    fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_y(self.yaw)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Minimum camera-space depth at which the perspective divide is valid.
    pub fn near_plane(&self) -> f32 {
        self.near_plane
    }

    /// Distance moved by one keyboard step.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Unit view axis in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation_matrix().transform_direction(Vec3::FORWARD)
    }

    pub fn right(&self) -> Vec3 {
        self.rotation_matrix().transform_direction(Vec3::RIGHT)
    }

    // =========================================================================
    // Movement
    // =========================================================================

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_near_plane(&mut self, near_plane: f32) {
        self.near_plane = near_plane;
    }

    /// Moves along the view axis. Negative distances move forward.
    pub fn move_back(&mut self, distance: f32) {
        self.position = self.position - self.forward() * distance;
    }

    pub fn move_forward(&mut self, distance: f32) {
        self.move_back(-distance);
    }

    /// Strafes along the camera's right axis.
    pub fn move_right(&mut self, distance: f32) {
        self.position = self.position + self.right() * distance;
    }

    /// Moves along world up.
    pub fn move_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    pub fn rotate_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(std::f32::consts::TAU);
    }
}

impl Transformable for Camera {
    /// World-to-camera matrix: the inverse of `T(position) * R(yaw)`.
    fn transformation(&self) -> Mat4 {
        self.rotation_matrix().transpose()
            * Mat4::translation(-self.position.x, -self.position.y, -self.position.z)
    }
}
