//! Shading models.
//!
//! The rasterizer decides coverage and visibility; a [`Shading`] value tells
//! it how to color the pixels that survive. It is one of two modes:
//!
//! - [`Shading::PerTriangle`]: one packed color for the whole triangle,
//!   computed up front by the Lambert model ([`lambert_color`]).
//! - [`Shading::PerPixel`]: a [`PixelShader`] called with the barycentric
//!   weights of every pixel that passes the depth test. [`GouraudShader`]
//!   interpolates per-vertex intensities this way.

use serde::Deserialize;

use crate::colors::{pack_rgba, scale_rgb, Rgba};
use crate::light::SurfaceLighting;
use crate::math::vec3::Vec3;
use crate::mesh::face_normal;

/// Per-pixel color computation.
///
/// The rasterizer calls `shade()` for each covered pixel that passes the
/// depth test.
///
/// # Barycentric Coordinates
///
/// `lambda` holds three weights [λ₀, λ₁, λ₂] that sum to 1.0 inside the
/// triangle, one per vertex in submission order. Any per-vertex attribute is
/// interpolated as `λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`.
pub trait PixelShader {
    fn shade(&self, lambda: [f32; 3]) -> u32;
}

impl<F> PixelShader for F
where
    F: Fn([f32; 3]) -> u32,
{
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        self(lambda)
    }
}

/// How a triangle's pixels get their color.
#[derive(Clone, Copy)]
pub enum Shading<'a> {
    /// One precomputed packed color for every pixel.
    PerTriangle(u32),
    /// Called per pixel with barycentric weights.
    PerPixel(&'a dyn PixelShader),
}

impl Shading<'_> {
    #[inline]
    pub(crate) fn color(&self, lambda: [f32; 3]) -> u32 {
        match self {
            Shading::PerTriangle(color) => *color,
            Shading::PerPixel(shader) => shader.shade(lambda),
        }
    }
}

/// Shading model selected by a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShaderKind {
    /// Flat, one lighting computation per triangle.
    Lambert,
    /// Smooth, per-vertex lighting interpolated per pixel.
    #[default]
    Gouraud,
}

impl std::fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderKind::Lambert => write!(f, "lambert"),
            ShaderKind::Gouraud => write!(f, "gouraud"),
        }
    }
}

/// Flat Lambert color of a triangle given its view-space corners.
///
/// Uses the face normal `(c - a) × (b - a)` and the direction from the
/// triangle's centroid toward the light.
pub fn lambert_color(corners: [Vec3; 3], lighting: &SurfaceLighting, base: Rgba) -> u32 {
    let [a, b, c] = corners;
    let centroid = (a + b + c) / 3.0;
    let intensity = lighting.intensity_at(centroid, face_normal(a, b, c));
    pack_rgba(scale_rgb(base, intensity))
}

/// Interpolates three vertex intensities and scales the base color by the
/// result.
#[derive(Debug, Clone, Copy)]
pub struct GouraudShader {
    intensities: [f32; 3],
    base: Rgba,
}

impl GouraudShader {
    pub fn new(intensities: [f32; 3], base: Rgba) -> Self {
        Self { intensities, base }
    }
}

impl PixelShader for GouraudShader {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> u32 {
        let i = (lambda[0] * self.intensities[0]
            + lambda[1] * self.intensities[1]
            + lambda[2] * self.intensities[2])
            .clamp(0.0, 1.0);
        pack_rgba(scale_rgb(self.base, i))
    }
}
