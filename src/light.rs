//! Lighting types for the renderer.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// A point light. Position is homogeneous with `w = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec4,
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self {
            position: Vec4::from(position),
        }
    }

    /// Light position after the world → view transform.
    pub fn view_position(&self, view: &Mat4) -> Vec3 {
        (*view * self.position).to_vec3()
    }
}

/// Diffuse response of a surface point.
///
/// Returns `clamp(ambient + albedo * max(0, N·L), 0, 1)` with both vectors
/// normalized first. A zero normal gets ambient only.
#[inline]
pub fn diffuse_intensity(normal: Vec3, to_light: Vec3, ambient: f32, albedo: f32) -> f32 {
    let lambert = normal.normalize().dot(to_light.normalize()).max(0.0);
    (ambient + albedo * lambert).clamp(0.0, 1.0)
}

/// Everything the shading models need to light a surface in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLighting {
    /// Light position in view space.
    pub light: Vec3,
    pub ambient: f32,
    pub albedo: f32,
}

impl SurfaceLighting {
    /// Intensity at a view-space point with the given normal.
    #[inline]
    pub fn intensity_at(&self, position: Vec3, normal: Vec3) -> f32 {
        diffuse_intensity(normal, self.light - position, self.ambient, self.albedo)
    }
}
