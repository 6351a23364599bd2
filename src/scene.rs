//! World-to-screen composition for one model.
//!
//! A [`Scene`] owns the model's pose and its animation step. The camera,
//! light and viewport it composes with come from the shared
//! [`RenderContext`].

use crate::animation::AnimationStep;
use crate::context::RenderContext;
use crate::math::{Coord2D, HomogeneousCoord, Mat4};
use crate::transform::{ModelInstance, Transformable};

/// Outcome of projecting one homogeneous coordinate to 2D.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projected {
    Point(Coord2D),
    /// The vertex was at or behind the near plane. The camera has already
    /// been moved back; the current frame must be rebuilt from scratch.
    NeedsRestart,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    model_instance: ModelInstance,
    animation_step: AnimationStep,
}

impl Scene {
    pub fn new(model_instance: ModelInstance) -> Self {
        Self {
            model_instance,
            animation_step: AnimationStep::default(),
        }
    }

    pub fn with_animation(mut self, step: AnimationStep) -> Self {
        self.animation_step = step;
        self
    }

    pub fn model_instance(&self) -> &ModelInstance {
        &self.model_instance
    }

    pub fn model_instance_mut(&mut self) -> &mut ModelInstance {
        &mut self.model_instance
    }

    pub fn set_model_instance(&mut self, model_instance: ModelInstance) {
        self.model_instance = model_instance;
    }

    pub fn animation_step(&self) -> &AnimationStep {
        &self.animation_step
    }

    pub fn set_animation_step(&mut self, step: AnimationStep) {
        self.animation_step = step;
    }

    /// The current pose matrix. Unlike [`Scene::transformation`] this never
    /// advances the animation.
    pub fn model_matrix(&self) -> Mat4 {
        self.model_instance.transformation()
    }

    /// `M_proj * M_cam * M_model`, recomputed on every call.
    ///
    /// With animation enabled this first advances the pose by one step, so
    /// call it once per object per frame.
    pub fn transformation(&mut self, ctx: &RenderContext) -> Mat4 {
        if ctx.animation_enabled() {
            self.model_instance.animation_step(&self.animation_step);
        }
        ctx.viewport().transformation() * ctx.camera().transformation() * self.model_matrix()
    }

    /// Divides by depth, or backs the camera away when the point is too close.
    ///
    /// For `z <= D` (the camera's near plane) the camera moves back along its
    /// view axis by `D - z + 1`, which puts this vertex exactly one unit past
    /// the near plane on the next pass.
    pub fn project(coord: HomogeneousCoord, ctx: &mut RenderContext) -> Projected {
        let z = coord.z;
        let near_plane = ctx.camera().near_plane();
        if z <= near_plane {
            let deficit = near_plane - z + 1.0;
            log::debug!("vertex at depth {z} inside near plane {near_plane}; moving camera back {deficit}");
            ctx.camera_mut().move_back(deficit);
            return Projected::NeedsRestart;
        }
        Projected::Point(Coord2D::new(coord.x / z, coord.y / z, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::light::Light;
    use crate::math::Vec3;
    use crate::viewport::Viewport;
    use approx::assert_relative_eq;

    fn context(near_plane: f32) -> RenderContext {
        RenderContext::new(
            Camera::default().with_near_plane(near_plane),
            Light::default(),
            Viewport::new(100, 100).with_window(1.0, 1.0, 1.0),
        )
    }

    #[test]
    fn projection_divides_by_depth() {
        let mut ctx = context(1.0);
        let projected = Scene::project(HomogeneousCoord::new(9.0, -3.0, 3.0, 1.0), &mut ctx);
        assert_eq!(projected, Projected::Point(Coord2D::new(3.0, -1.0, 3.0)));
        assert_eq!(ctx.camera().position(), Vec3::ZERO);
    }

    #[test]
    fn too_close_moves_camera_back_by_deficit_plus_one() {
        let mut ctx = context(2.0);
        let projected = Scene::project(HomogeneousCoord::new(1.0, 1.0, 0.5, 1.0), &mut ctx);

        assert_eq!(projected, Projected::NeedsRestart);
        // D - z + 1 = 2 - 0.5 + 1
        assert_relative_eq!(ctx.camera().position().z, -2.5);
    }

    #[test]
    fn depth_equal_to_near_plane_is_rejected() {
        let mut ctx = context(1.0);
        let projected = Scene::project(HomogeneousCoord::new(0.0, 0.0, 1.0, 1.0), &mut ctx);
        assert_eq!(projected, Projected::NeedsRestart);
        assert_relative_eq!(ctx.camera().position().z, -1.0);
    }

    #[test]
    fn composition_is_projection_camera_model() {
        let mut ctx = context(1.0);
        ctx.camera_mut().set_position(Vec3::new(0.0, 0.0, -2.0));
        let mut scene = Scene::new(ModelInstance::at(Vec3::new(1.0, 0.0, 3.0)));

        let p = scene.transformation(&ctx) * HomogeneousCoord::point(Vec3::ZERO);

        // model: (1, 0, 3); camera: depth 5; viewport scales x by 100.
        assert_relative_eq!(p.x, 100.0);
        assert_relative_eq!(p.z, 5.0);
    }

    #[test]
    fn animation_advances_once_per_call_only_when_enabled() {
        let step = AnimationStep::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));
        let mut scene = Scene::new(ModelInstance::default()).with_animation(step);
        let mut ctx = context(1.0);

        scene.transformation(&ctx);
        assert_eq!(scene.model_instance().position(), Vec3::ZERO);

        ctx.set_animation_enabled(true);
        scene.transformation(&ctx);
        scene.transformation(&ctx);
        assert_eq!(scene.model_instance().position(), Vec3::new(0.0, 0.0, 2.0));

        // Reading the model matrix never advances.
        scene.model_matrix();
        assert_eq!(scene.model_instance().position(), Vec3::new(0.0, 0.0, 2.0));
    }
}
