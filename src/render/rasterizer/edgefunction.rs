//! Edge function-based triangle rasterization.
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! This is the 2D cross product (B - A) × (P - A). Its sign tells which side
//! of the edge P lies on. Evaluated at the third vertex it gives twice the
//! signed area of the triangle; with y pointing down, a triangle that is
//! clockwise on screen has negative area.
//!
//! # Barycentric Coordinates
//!
//! The three edge values always sum to the signed area, so
//!
//! ```text
//! lambda_i = E_i(P) / area
//! ```
//!
//! where E_i is the edge function for the edge opposite vertex i. Depth and
//! shading attributes are interpolated with these weights in screen space,
//! without perspective correction.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::{FrontFace, RasterOutcome, Rasterizer};
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;
use crate::render::shader::Shading;

/// Triangle rasterizer using the edge function algorithm.
///
/// Iterates every pixel center in the triangle's bounding box (clamped to
/// the buffer) and keeps the ones where all three edge functions agree in
/// sign with the triangle's area. Triangles whose winding does not match
/// the configured [`FrontFace`] are culled before any pixel is visited.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeFunctionRasterizer {
    front_face: FrontFace,
}

impl EdgeFunctionRasterizer {
    pub fn new(front_face: FrontFace) -> Self {
        Self { front_face }
    }

    pub fn front_face(&self) -> FrontFace {
        self.front_face
    }

    pub fn set_front_face(&mut self, front_face: FrontFace) {
        self.front_face = front_face;
    }

    /// Computes the edge function value for point P relative to edge (A -> B).
    #[inline]
    pub fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f32 {
        (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
    }
}

impl Rasterizer for EdgeFunctionRasterizer {
    fn fill_triangle(
        &self,
        points: [Vec3; 3],
        buffer: &mut FrameBuffer,
        shading: Shading<'_>,
    ) -> RasterOutcome {
        let [v0, v1, v2] = points;

        // Back-face cull. Also drops zero-area and NaN triangles.
        let area = Self::edge_function(v0, v1, v2);
        if !self.front_face.is_front(area) {
            return RasterOutcome::Culled;
        }
        let inv_area = 1.0 / area;

        let width = buffer.width() as i32;
        let height = buffer.height() as i32;
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(width - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(height - 1);

        let mut pixels = 0;
        for y in min_y..=max_y {
            let row = y as usize * width as usize;
            for x in min_x..=max_x {
                let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);

                let w0 = Self::edge_function(v1, v2, p);
                let w1 = Self::edge_function(v2, v0, p);
                let w2 = Self::edge_function(v0, v1, p);

                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if !inside {
                    continue;
                }

                let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];
                let depth = lambda[0] * v0.z + lambda[1] * v1.z + lambda[2] * v2.z;

                if buffer.write_if_nearer(row + x as usize, depth, || shading.color(lambda)) {
                    pixels += 1;
                }
            }
        }

        RasterOutcome::Drawn { pixels }
    }
}
