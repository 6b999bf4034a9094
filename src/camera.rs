//! First-person camera
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer (a level camera looks down -Z)
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles; the basis vectors are derived
//! from them on demand.
//!
//! - **Yaw**: Rotation around Y-axis (positive = turn left)
//! - **Pitch**: Rotation around the camera's right axis (positive = look up)

use std::collections::HashSet;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::projection::Projection;

/// Pitch is kept just short of straight up/down so the basis never degenerates.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - 1e-3;

/// First-person camera with an eye position, yaw/pitch orientation and
/// perspective parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in radians.
    fov_y: f32,
    near: f32,
    far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0, 0.0, 60.0, 0.1, 10_000.0)
    }
}

impl Camera {
    /// Creates a camera. `fov_degrees` is the vertical field of view in
    /// degrees and is converted to radians here, once.
    pub fn new(eye: Vec3, yaw: f32, pitch: f32, fov_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            eye,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            fov_y: fov_degrees.to_radians(),
            near,
            far,
        }
    }

    /// Camera at `eye` with level orientation and default lens settings.
    pub fn at(eye: Vec3) -> Self {
        Self {
            eye,
            ..Self::default()
        }
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    fn clamped_pitch(&self) -> f32 {
        self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// Turns the camera; positive yaw turns left. Yaw is wrapped into [-π, π].
    pub fn rotate_yaw(&mut self, delta: f32) {
        self.yaw += delta;
        if self.yaw > PI {
            self.yaw -= TAU;
        }
        if self.yaw < -PI {
            self.yaw += TAU;
        }
    }

    /// Tilts the camera; positive pitch looks up. Clamped to [`PITCH_LIMIT`].
    pub fn rotate_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    // =========================================================================
    // Basis vectors
    // =========================================================================

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.clamped_pitch().sin_cos();
        Vec3::new(-sy * cp, sp, -cy * cp)
    }

    /// Unit right vector; always horizontal.
    pub fn right(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        Vec3::new(cy, 0.0, -sy)
    }

    /// Unit up vector, `right × forward`.
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// World → view transform. The eye maps to the origin and the view
    /// direction to -Z.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::view_from_basis(self.eye, self.right(), self.up(), self.forward())
    }

    pub fn projection(&self, aspect_ratio: f32) -> Projection {
        Projection::new(self.fov_y, aspect_ratio, self.near, self.far)
    }
}

// =============================================================================
// Keyboard Controller
// =============================================================================

/// Keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    LookUp,
    LookDown,
}

/// Drives a [`Camera`] from the set of currently held keys.
///
/// Movement stays on the ground plane: forward/back follow the camera's view
/// direction with its vertical part removed, strafing follows its right
/// vector.
#[derive(Debug, Clone)]
pub struct KeyboardController {
    held: HashSet<Key>,
    /// Movement speed in units per second.
    pub move_speed: f32,
    /// Yaw rate in radians per second.
    pub yaw_speed: f32,
    /// Pitch rate in radians per second.
    pub pitch_speed: f32,
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self {
            held: HashSet::new(),
            move_speed: 400.0,
            yaw_speed: 0.9,
            pitch_speed: 0.9,
        }
    }
}

impl KeyboardController {
    pub fn new(move_speed: f32, yaw_speed: f32, pitch_speed: f32) -> Self {
        Self {
            move_speed,
            yaw_speed,
            pitch_speed,
            ..Self::default()
        }
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Releases every held key.
    pub fn dispose(&mut self) {
        self.held.clear();
    }

    /// Applies `dt` seconds of the held keys to the camera.
    pub fn update(&self, camera: &mut Camera, dt: f32) {
        if self.is_held(Key::TurnLeft) {
            camera.rotate_yaw(self.yaw_speed * dt);
        }
        if self.is_held(Key::TurnRight) {
            camera.rotate_yaw(-self.yaw_speed * dt);
        }
        if self.is_held(Key::LookUp) {
            camera.rotate_pitch(self.pitch_speed * dt);
        }
        if self.is_held(Key::LookDown) {
            camera.rotate_pitch(-self.pitch_speed * dt);
        }

        let forward = camera.forward();
        let forward = Vec3::new(forward.x, 0.0, forward.z).normalize();
        let right = camera.right();

        let mut direction = Vec3::ZERO;
        if self.is_held(Key::Forward) {
            direction += forward;
        }
        if self.is_held(Key::Back) {
            direction = direction - forward;
        }
        if self.is_held(Key::StrafeLeft) {
            direction = direction - right;
        }
        if self.is_held(Key::StrafeRight) {
            direction += right;
        }

        camera.eye += direction.normalize() * (self.move_speed * dt);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec4::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn camera_starts_looking_down_negative_z() {
        let camera = Camera::default();
        assert_relative_eq!(camera.forward().z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.right().x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.up().y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn fov_is_converted_to_radians() {
        let camera = Camera::new(Vec3::ZERO, 0.0, 0.0, 90.0, 1.0, 100.0);
        assert_relative_eq!(camera.fov_y(), FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn positive_yaw_turns_left() {
        let mut camera = Camera::default();
        camera.rotate_yaw(FRAC_PI_2);
        assert_relative_eq!(camera.forward().x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.forward().z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::default();
        camera.rotate_pitch(PI);
        assert_relative_eq!(camera.pitch, PITCH_LIMIT);

        // Even a pitch written directly is clamped before building the basis.
        camera.pitch = 10.0;
        assert!(camera.forward().y < 1.0);
        assert!(camera.up().magnitude() > 0.0);
    }

    #[test]
    fn yaw_wraps() {
        let mut camera = Camera::default();
        camera.rotate_yaw(3.0);
        camera.rotate_yaw(1.0);
        assert!(camera.yaw <= PI && camera.yaw >= -PI);
        assert_relative_eq!(camera.yaw, 4.0 - TAU, epsilon = 1e-5);
    }

    #[test]
    fn basis_is_orthonormal() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 0.7, -0.4, 60.0, 0.1, 100.0);
        let (r, u, f) = (camera.right(), camera.up(), camera.forward());
        assert_relative_eq!(r.dot(u), 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.dot(f), 0.0, epsilon = 1e-6);
        assert_relative_eq!(u.dot(f), 0.0, epsilon = 1e-6);
        assert_relative_eq!(u.magnitude(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn view_matrix_puts_target_in_front() {
        let camera = Camera::at(Vec3::new(0.0, 0.0, 750.0));
        let origin = camera.view_matrix() * Vec4::point(0.0, 0.0, 0.0);
        assert_relative_eq!(origin.z, -750.0, epsilon = 1e-3);

        let eye = camera.view_matrix() * Vec4::from(camera.eye);
        assert_relative_eq!(eye.to_vec3().magnitude(), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn controller_moves_on_ground_plane() {
        let mut camera = Camera::new(Vec3::ZERO, 0.0, 0.5, 60.0, 0.1, 100.0);
        let mut controller = KeyboardController::default();
        controller.key_down(Key::Forward);
        controller.update(&mut camera, 0.5);

        assert_relative_eq!(camera.eye.y, 0.0);
        assert_relative_eq!(camera.eye.z, -200.0, epsilon = 1e-3);
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let mut camera = Camera::default();
        let mut controller = KeyboardController::default();
        controller.key_down(Key::Forward);
        controller.key_down(Key::StrafeRight);
        controller.update(&mut camera, 1.0);

        assert_relative_eq!(camera.eye.magnitude(), 400.0, epsilon = 1e-2);
    }

    #[test]
    fn dispose_releases_keys() {
        let mut camera = Camera::default();
        let mut controller = KeyboardController::default();
        controller.key_down(Key::TurnLeft);
        controller.key_down(Key::LookUp);
        controller.dispose();
        controller.update(&mut camera, 1.0);

        assert_eq!(camera, Camera::default());
    }

    #[test]
    fn key_up_stops_motion() {
        let mut controller = KeyboardController::default();
        controller.key_down(Key::Back);
        controller.key_up(Key::Back);
        assert!(!controller.is_held(Key::Back));
    }
}
