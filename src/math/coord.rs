//! Coordinate types flowing through one frame of the pipeline.
//!
//! A model vertex becomes a [`HomogeneousCoord`] after the composed
//! world-to-screen matrix, a [`Coord2D`] after the divide by depth, and a
//! [`ScreenPoint`] once mapped onto the raster.

use std::fmt;

use super::vec3::Vec3;

/// A point in camera/projection space before the perspective divide.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HomogeneousCoord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl HomogeneousCoord {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Lifts a model-space vertex to a homogeneous point (w = 1).
    pub const fn point(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z, 1.0)
    }

    pub const fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<Vec3> for HomogeneousCoord {
    fn from(v: Vec3) -> Self {
        Self::point(v)
    }
}

/// Result of dividing a homogeneous coordinate by its depth.
///
/// `x` and `y` are centered on the viewport; `z` is the depth the divide used.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord2D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Coord2D {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// An integer raster position. `y` grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for ScreenPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
