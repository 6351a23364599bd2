//! Per-frame model animation.
//!
//! An [`AnimationStep`] is a delta applied to a [`ModelInstance`] once per
//! frame. It can run inline (the scene applies it while composing the frame's
//! matrix) or on the [`Animator`] worker thread, which receives pose
//! snapshots and sends advanced poses back. The worker never touches a pose
//! the render thread is reading: poses cross the channel by value and are
//! swapped in at the start of the next frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::math::Vec3;
use crate::transform::ModelInstance;

/// Rotation and translation added to a pose every frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationStep {
    /// Euler angle deltas in radians.
    pub rotation: Vec3,
    pub translation: Vec3,
}

impl AnimationStep {
    pub const fn new(rotation: Vec3, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// A pure rotation step.
    pub const fn spin(rotation: Vec3) -> Self {
        Self::new(rotation, Vec3::ZERO)
    }

    /// Returns `pose` advanced by this step.
    pub fn advance(&self, mut pose: ModelInstance) -> ModelInstance {
        pose.animation_step(self);
        pose
    }
}

struct PoseJob {
    index: usize,
    pose: ModelInstance,
    step: AnimationStep,
}

/// An advanced pose for the render object at `index`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoseUpdate {
    pub index: usize,
    pub pose: ModelInstance,
}

/// Background worker that advances pose snapshots.
pub struct Animator {
    jobs: Option<Sender<PoseJob>>,
    updates: Receiver<PoseUpdate>,
    worker: Option<JoinHandle<()>>,
}

impl Animator {
    pub fn spawn() -> Result<Self, RenderError> {
        let (job_tx, job_rx) = mpsc::channel::<PoseJob>();
        let (update_tx, update_rx) = mpsc::channel();

        let worker = thread::Builder::new()
            .name("animation".into())
            .spawn(move || {
                for job in job_rx {
                    let update = PoseUpdate {
                        index: job.index,
                        pose: job.step.advance(job.pose),
                    };
                    if update_tx.send(update).is_err() {
                        break;
                    }
                }
                log::debug!("animation worker stopped");
            })?;

        Ok(Self {
            jobs: Some(job_tx),
            updates: update_rx,
            worker: Some(worker),
        })
    }

    /// Queues one pose snapshot for advancing.
    pub fn submit(
        &self,
        index: usize,
        pose: ModelInstance,
        step: AnimationStep,
    ) -> Result<(), RenderError> {
        self.jobs
            .as_ref()
            .ok_or(RenderError::AnimatorDisconnected)?
            .send(PoseJob { index, pose, step })
            .map_err(|_| RenderError::AnimatorDisconnected)
    }

    /// Blocks until `count` updates have arrived.
    pub fn collect(&self, count: usize) -> Result<Vec<PoseUpdate>, RenderError> {
        (0..count)
            .map(|_| {
                self.updates
                    .recv()
                    .map_err(|_| RenderError::AnimatorDisconnected)
            })
            .collect()
    }

    /// Returns whatever updates are ready without blocking.
    pub fn try_collect(&self) -> Vec<PoseUpdate> {
        self.updates.try_iter().collect()
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop.
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("animation worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn advance_leaves_the_snapshot_untouched() {
        let step = AnimationStep::spin(Vec3::new(0.0, 0.25, 0.0));
        let snapshot = ModelInstance::at(Vec3::new(0.0, 0.0, 4.0));

        let advanced = step.advance(snapshot);

        assert_eq!(snapshot.rotation(), Vec3::ZERO);
        assert_relative_eq!(advanced.rotation().y, 0.25);
    }

    #[test]
    fn worker_returns_advanced_poses() {
        let animator = Animator::spawn().unwrap();
        let step = AnimationStep::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));

        animator.submit(0, ModelInstance::default(), step).unwrap();
        animator
            .submit(1, ModelInstance::at(Vec3::new(5.0, 0.0, 0.0)), step)
            .unwrap();

        let mut updates = animator.collect(2).unwrap();
        updates.sort_by_key(|u| u.index);

        assert_eq!(updates[0].pose.position(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(updates[1].pose.position(), Vec3::new(6.0, 0.0, 0.0));
    }

    #[test]
    fn nothing_pending_means_no_updates() {
        let animator = Animator::spawn().unwrap();
        assert!(animator.try_collect().is_empty());
    }
}
