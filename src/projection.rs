//! Perspective projection parameters.
//!
//! [`Projection`] bundles FOV, aspect ratio and clip distances and builds the
//! perspective matrix from them. Its clip-space z range is the contract the
//! frustum test in [`crate::frustum`] checks against.

use crate::math::mat4::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Aspect ratio of a `width` x `height` viewport. A zero height is
    /// treated as one pixel.
    pub fn aspect_of(width: u32, height: u32) -> f32 {
        width as f32 / height.max(1) as f32
    }

    /// Right-handed perspective matrix, clip z in [-w, w].
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}
