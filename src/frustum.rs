//! Per-vertex view-frustum rejection in homogeneous clip space.
//!
//! The clip volume matches [`crate::projection::Projection::matrix`]:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w   (OpenGL-style depth range)
//! ```
//!
//! There is no geometric clipping. A vertex outside the volume is marked
//! invalid and any triangle that uses it is dropped whole.
//!
//! The test runs against a *biased* `w' = w + margin`, which widens the volume
//! slightly so triangles grazing the near plane do not pop in and out. This
//! is a tolerance, not real near-plane clipping: with a large margin, vertices
//! just behind the near plane are accepted and project with a tiny `w`.

use crate::math::vec4::Vec4;

/// Default bias added to clip-space `w`.
pub const DEFAULT_W_MARGIN: f32 = 0.1;

/// The six planes of the clip volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// x >= -w
    Left,
    /// x <= w
    Right,
    /// y >= -w
    Bottom,
    /// y <= w
    Top,
    /// z >= -w
    Near,
    /// z <= w
    Far,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// Signed distance of `p` from this plane using the given `w`.
    /// Negative means outside.
    pub fn signed_distance(&self, p: Vec4, w: f32) -> f32 {
        match self {
            Self::Left => w + p.x,
            Self::Right => w - p.x,
            Self::Bottom => w + p.y,
            Self::Top => w - p.y,
            Self::Near => w + p.z,
            Self::Far => w - p.z,
        }
    }
}

/// Accept/reject test for clip-space vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrustumTest {
    w_margin: f32,
}

impl Default for FrustumTest {
    fn default() -> Self {
        Self::with_margin(DEFAULT_W_MARGIN)
    }
}

impl FrustumTest {
    pub fn with_margin(w_margin: f32) -> Self {
        Self { w_margin }
    }

    pub fn margin(&self) -> f32 {
        self.w_margin
    }

    /// True when the vertex is inside the biased clip volume.
    ///
    /// Rejects when the biased `w` is not positive, or when any of |x|, |y|,
    /// |z| exceeds it.
    #[inline]
    pub fn accepts(&self, clip: Vec4) -> bool {
        let w = clip.w + self.w_margin;
        if w <= 0.0 || w.is_nan() {
            return false;
        }
        ClipPlane::ALL
            .iter()
            .all(|plane| plane.signed_distance(clip, w) >= 0.0)
    }
}
