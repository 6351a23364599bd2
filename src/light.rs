//! Directional light feeding the per-triangle light coefficient.

use crate::math::Vec3;

pub const DEFAULT_AMBIENT: f32 = 0.2;

/// A directional light that illuminates the scene uniformly from a direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Normalized direction the light travels (not where it comes from).
    direction: Vec3,
    ambient: f32,
    /// Multiplier for the diffuse contribution.
    diffuse: f32,
}

impl Default for Light {
    /// Light travelling into the screen, so faces turned toward the camera are lit.
    fn default() -> Self {
        Self::new(Vec3::FORWARD)
    }
}

impl Light {
    /// The direction is normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
            ambient: DEFAULT_AMBIENT,
            diffuse: 1.0 - DEFAULT_AMBIENT,
        }
    }

    pub fn with_intensity(mut self, ambient: f32, diffuse: f32) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction.normalize();
    }

    pub fn ambient(&self) -> f32 {
        self.ambient
    }

    pub fn diffuse(&self) -> f32 {
        self.diffuse
    }

    /// Flat-shading coefficient for a face with the given normal, in [0, 1].
    ///
    /// Degenerate (zero-length) normals get the ambient term only.
    pub fn coefficient(&self, normal: Vec3) -> f32 {
        let lambert = normal
            .try_normalize()
            .map_or(0.0, |n| (-self.direction).dot(n).max(0.0));
        (self.ambient + self.diffuse * lambert).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn facing_the_light_is_fully_lit() {
        let light = Light::new(Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(light.coefficient(Vec3::new(0.0, 0.0, -1.0)), 1.0);
    }

    #[test]
    fn facing_away_gets_ambient_only() {
        let light = Light::new(Vec3::new(0.0, 0.0, 1.0)).with_intensity(0.1, 0.9);
        assert_relative_eq!(light.coefficient(Vec3::new(0.0, 0.0, 1.0)), 0.1);
    }

    #[test]
    fn angled_face() {
        let light = Light::new(Vec3::new(0.0, -1.0, 0.0)).with_intensity(0.0, 1.0);
        let normal = Vec3::new(0.0, 1.0, 1.0);
        // cos(45°)
        assert_relative_eq!(light.coefficient(normal), 0.70710677, epsilon = 1e-5);
    }

    #[test]
    fn overbright_settings_are_clamped() {
        let light = Light::default().with_intensity(0.8, 0.8);
        assert_relative_eq!(light.coefficient(-Vec3::FORWARD), 1.0);
    }

    #[test]
    fn zero_normal_is_ambient() {
        let light = Light::default();
        assert_relative_eq!(light.coefficient(Vec3::ZERO), DEFAULT_AMBIENT);
    }
}
