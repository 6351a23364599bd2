//! Transformation sources for the render pipeline.
//!
//! Anything that contributes a matrix to the world-to-screen composition
//! implements [`Transformable`]: the camera, the viewport projection, and the
//! per-object [`ModelInstance`] pose.

use serde::{Deserialize, Serialize};

use crate::animation::AnimationStep;
use crate::math::{Mat4, Vec3};

/// Produces a 4x4 transformation matrix.
pub trait Transformable {
    fn transformation(&self) -> Mat4;
}

/// Pose of one model in world space: position, rotation (Euler angles), scale.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// instance
///     .set_position_xyz(0.0, 0.0, 6.0)
///     .rotate_y(0.3)
///     .set_scale_uniform(1.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelInstance {
    position: Vec3,
    rotation: Vec3, // radians: x = pitch, y = yaw, z = roll
    scale: Vec3,
}

impl Default for ModelInstance {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl ModelInstance {
    pub fn new() -> Self {
        Self::default()
    }

    /// An unrotated, unscaled instance placed at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position = self.position + delta;
        self
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    /// Advances the pose by one animation step. Not idempotent.
    pub fn animation_step(&mut self, step: &AnimationStep) -> &mut Self {
        self.rotate(step.rotation).translate(step.translation)
    }
}

impl Transformable for ModelInstance {
    /// Translation * RotationX * RotationY * RotationZ * Scale
    /// (scale applied first, translation last).
    fn transformation(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z)
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }
}
