//! Placement of an entity in the world.
//!
//! A [`Transform`] holds where an entity sits, how big it is, and how fast it
//! spins. The orientation itself is the mesh's accumulated rotation; the
//! renderer adds [`Transform::spin`] to it once per frame.

use crate::math::{mat4::Mat4, vec3::Vec3};

/// Position, uniform scale and per-frame spin.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(5.0, 2.0, 0.0)
///     .set_spin(Vec3::new(0.0, 0.01, 0.0))
///     .set_scale(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    spin: Vec3, // radians per frame about x, y, z
    scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            spin: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn new(position: Vec3, spin: Vec3, scale: f32) -> Self {
        Self {
            position,
            spin,
            scale,
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
        self.position += delta;
        self
    }

    /// Rotation added to the mesh every frame (radians about x, y, z).
    pub fn spin(&self) -> Vec3 {
        self.spin
    }

    pub fn set_spin(&mut self, spin: Vec3) -> &mut Self {
        self.spin = spin;
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Model → world matrix for a mesh with the given accumulated rotation.
    ///
    /// Order: Translation * RotationZ * RotationY * RotationX * Scale
    /// (scale applied first, then X, Y, Z rotations, then translation).
    pub fn model_matrix(&self, rotation: Vec3) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_zyx(rotation)
            * Mat4::scaling(self.scale, self.scale, self.scale)
    }
}
