//! Linear algebra for the render pipeline.

pub mod coord;
pub mod mat4;
pub mod vec3;

pub use coord::{Coord2D, HomogeneousCoord, ScreenPoint};
pub use mat4::Mat4;
pub use vec3::Vec3;
