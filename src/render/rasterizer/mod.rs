//! Triangle rasterization.
//!
//! Screen-space triangles come in as three points `(x, y, depth)` with y
//! pointing down. The [`Rasterizer`] trait is the seam between the renderer
//! and the fill algorithm; [`EdgeFunctionRasterizer`] is the implementation.

mod edgefunction;

pub use edgefunction::EdgeFunctionRasterizer;

use super::framebuffer::FrameBuffer;
use super::shader::Shading;
use crate::math::vec3::Vec3;

/// Which screen-space winding counts as front-facing.
///
/// Winding is judged on the submitted point order after the vertical flip
/// to screen space, where a clockwise triangle has a negative signed area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrontFace {
    /// Negative signed area is front.
    #[default]
    Clockwise,
    /// Positive signed area is front.
    CounterClockwise,
}

impl FrontFace {
    /// True when a triangle with this signed area faces the viewer. Zero area
    /// is never front-facing.
    #[inline]
    pub fn is_front(self, signed_area: f32) -> bool {
        match self {
            FrontFace::Clockwise => signed_area < 0.0,
            FrontFace::CounterClockwise => signed_area > 0.0,
        }
    }
}

/// What happened to a submitted triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterOutcome {
    /// Back-facing or degenerate; nothing was touched.
    Culled,
    /// Front-facing and scanned. `pixels` counts depth-test passes.
    Drawn { pixels: usize },
}

/// Fills screen-space triangles into a frame buffer.
pub trait Rasterizer {
    /// Fill one triangle with depth testing, coloring visible pixels with
    /// `shading`. Barycentric weights are reported in `points` order.
    fn fill_triangle(
        &self,
        points: [Vec3; 3],
        buffer: &mut FrameBuffer,
        shading: Shading<'_>,
    ) -> RasterOutcome;
}
