//! Frame assembly: render objects, their triangles, and the restart loop.
//!
//! [`Render::render`] walks the [`RenderState`] in insertion order. When any
//! vertex lands inside the camera's near plane the camera has already been
//! pushed back, so the whole frame is thrown away and built again from the
//! first object. Poses are snapshotted before the first pass and restored on
//! every restart, so an animated object advances exactly once per frame no
//! matter how many passes the frame takes.

use crate::animation::{Animator, PoseUpdate};
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::math::{HomogeneousCoord, ScreenPoint};
use crate::model::Model;
use crate::scene::{Projected, Scene};
use crate::transform::ModelInstance;

use super::triangle::Triangle;

/// Result of building one object's triangles for the current pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Complete,
    /// A vertex hit the near plane; the frame must start over.
    Restart,
}

/// A scene paired with the geometry it places.
#[derive(Clone, Debug)]
pub struct RenderObject {
    scene: Scene,
    model: Model,
    triangles: Vec<Triangle>,
}

impl RenderObject {
    pub fn new(scene: Scene, model: Model) -> Self {
        Self {
            scene,
            model,
            triangles: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    /// Triangles from the last completed [`RenderObject::init`].
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Rebuilds this object's screen-space triangles.
    ///
    /// Each face is lit from its world-space normal, then its corners are
    /// projected one by one. The first vertex that needs a restart stops the
    /// pass and leaves no triangles behind.
    pub fn init(&mut self, ctx: &mut RenderContext) -> FrameOutcome {
        self.triangles.clear();

        let transform = self.scene.transformation(ctx);
        let model_matrix = self.scene.model_matrix();
        let color = self.model.color();

        for &face in self.model.faces() {
            let corners = self.model.face_vertices(face);
            let world = corners.map(|v| model_matrix * v);
            let normal = (world[1] - world[0]).cross(world[2] - world[0]);
            let light_coefficient = ctx.light().coefficient(normal);

            let mut points = [ScreenPoint::default(); 3];
            for (point, corner) in points.iter_mut().zip(corners) {
                match Scene::project(transform * HomogeneousCoord::point(corner), ctx) {
                    Projected::Point(coord) => *point = ctx.viewport().to_screen(coord),
                    Projected::NeedsRestart => {
                        self.triangles.clear();
                        return FrameOutcome::Restart;
                    }
                }
            }
            self.triangles
                .push(Triangle::new(points, light_coefficient, color));
        }
        FrameOutcome::Complete
    }
}

/// Render objects in draw order. There is no depth sorting across objects.
#[derive(Clone, Debug, Default)]
pub struct RenderState {
    objects: Vec<RenderObject>,
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an object and returns its index.
    pub fn push(&mut self, object: RenderObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RenderObject> {
        self.objects.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut RenderObject> {
        self.objects.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut RenderObject> {
        self.objects.iter_mut()
    }

    fn poses(&self) -> Vec<ModelInstance> {
        self.objects
            .iter()
            .map(|object| *object.scene.model_instance())
            .collect()
    }

    fn restore_poses(&mut self, poses: &[ModelInstance]) {
        for (object, pose) in self.objects.iter_mut().zip(poses) {
            object.scene.set_model_instance(*pose);
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Render {
    state: RenderState,
}

impl Render {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: RenderObject) -> usize {
        self.state.push(object)
    }

    pub fn insert_scene(&mut self, scene: Scene, model: Model) -> usize {
        self.insert(RenderObject::new(scene, model))
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RenderState {
        &mut self.state
    }

    /// Builds the frame's triangles, in object order.
    ///
    /// Restarts from the first object whenever a pass is aborted. After
    /// `ctx.max_retries()` restarts the frame is abandoned with
    /// [`RenderError::RetryLimitExceeded`] and the poses are left as they
    /// were before the call.
    pub fn render(&mut self, ctx: &mut RenderContext) -> Result<Vec<Triangle>, RenderError> {
        let poses = self.state.poses();
        let mut restarts = 0;

        loop {
            if let Some(frame) = self.build_frame(ctx) {
                if restarts > 0 {
                    log::debug!(
                        "frame completed after {restarts} restart(s); camera at {:?}",
                        ctx.camera().position()
                    );
                }
                return Ok(frame);
            }

            self.state.restore_poses(&poses);
            if restarts >= ctx.max_retries() {
                log::warn!("giving up on frame after {restarts} restart(s)");
                return Err(RenderError::RetryLimitExceeded { retries: restarts });
            }
            restarts += 1;
        }
    }

    /// One pass over every object; `None` when the pass was aborted.
    fn build_frame(&mut self, ctx: &mut RenderContext) -> Option<Vec<Triangle>> {
        let mut frame = Vec::new();
        for (index, object) in self.state.iter_mut().enumerate() {
            match object.init(ctx) {
                FrameOutcome::Complete => frame.extend_from_slice(object.triangles()),
                FrameOutcome::Restart => {
                    log::debug!("object {index} crossed the near plane; restarting frame");
                    return None;
                }
            }
        }
        Some(frame)
    }

    /// Sends every object's pose and animation step to the worker.
    ///
    /// Returns the number of jobs queued, i.e. how many updates to wait for.
    pub fn submit_animation(&self, animator: &Animator) -> Result<usize, RenderError> {
        for (index, object) in self.state.iter().enumerate() {
            let scene = object.scene();
            animator.submit(index, *scene.model_instance(), *scene.animation_step())?;
        }
        Ok(self.state.len())
    }

    /// Swaps in poses advanced by the worker.
    pub fn apply_poses(&mut self, updates: impl IntoIterator<Item = PoseUpdate>) {
        for update in updates {
            match self.state.get_mut(update.index) {
                Some(object) => object.scene_mut().set_model_instance(update.pose),
                None => log::warn!("pose update for unknown object {}", update.index),
            }
        }
    }
}
