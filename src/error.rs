//! Fatal pipeline errors.
//!
//! A near-plane violation is not in here: it is the
//! [`Projected::NeedsRestart`](crate::scene::Projected) value and is handled by
//! the orchestrator. Everything below surfaces to the presentation layer.

use thiserror::Error;

use crate::config::ConfigError;
use crate::model::ModelError;

#[derive(Error, Debug)]
pub enum RenderError {
    /// The camera kept colliding with geometry. Usually the near plane is
    /// configured deeper than the scene.
    #[error("frame restarted {retries} times without completing; check the camera near plane")]
    RetryLimitExceeded { retries: u32 },

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("animation worker is no longer running")]
    AnimatorDisconnected,
}
