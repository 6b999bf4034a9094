//! Frame driver.
//!
//! The [`Renderer`] owns the frame buffer and runs one full frame per
//! [`Renderer::draw_scene`] call: clear, then for each entity tick its
//! animation state, project its mesh and rasterize its triangles.

use log::{info, trace};

use super::framebuffer::FrameBuffer;
use super::rasterizer::{EdgeFunctionRasterizer, FrontFace, RasterOutcome, Rasterizer};
use super::shader::{lambert_color, GouraudShader, ShaderKind, Shading};
use crate::frustum::FrustumTest;
use crate::math::vec3::Vec3;
use crate::pipeline::GeometryPipeline;
use crate::scene::{Entity, Scene};

/// Triangle counters for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub entities: usize,
    pub triangles_submitted: usize,
    /// Dropped because a corner failed the frustum test.
    pub triangles_rejected: usize,
    /// Back-facing or zero-area on screen.
    pub triangles_culled: usize,
    pub triangles_drawn: usize,
}

impl std::ops::AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.entities += rhs.entities;
        self.triangles_submitted += rhs.triangles_submitted;
        self.triangles_rejected += rhs.triangles_rejected;
        self.triangles_culled += rhs.triangles_culled;
        self.triangles_drawn += rhs.triangles_drawn;
    }
}

pub struct Renderer {
    frame_buffer: FrameBuffer,
    rasterizer: EdgeFunctionRasterizer,
    frustum: FrustumTest,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame_buffer: FrameBuffer::new(width, height),
            rasterizer: EdgeFunctionRasterizer::default(),
            frustum: FrustumTest::default(),
        }
    }

    /// Reallocate and clear the buffers for a new viewport size. Takes
    /// effect from the next frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        info!("Resizing frame buffer to {}x{}", width, height);
        self.frame_buffer.resize(width, height);
    }

    pub fn width(&self) -> u32 {
        self.frame_buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.frame_buffer.height()
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// The color buffer as bytes, for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        self.frame_buffer.as_bytes()
    }

    pub fn set_front_face(&mut self, front_face: FrontFace) {
        self.rasterizer.set_front_face(front_face);
    }

    pub fn set_frustum(&mut self, frustum: FrustumTest) {
        self.frustum = frustum;
    }

    /// Render one frame of `scene` into the frame buffer.
    ///
    /// Mutates the scene's per-frame state: meshes advance by their spin,
    /// rainbow materials step their hue, and every mesh's frame buffers are
    /// rewritten.
    pub fn draw_scene(&mut self, scene: &mut Scene) -> FrameStats {
        self.frame_buffer.clear();

        let pipeline = GeometryPipeline::new(
            &scene.camera,
            self.frame_buffer.width(),
            self.frame_buffer.height(),
            self.frustum,
        );
        let view_light = scene.light.view_position(pipeline.view());

        let mut stats = FrameStats::default();
        for entity in &mut scene.entities {
            entity.tick();
            stats += self.draw_entity(&pipeline, view_light, entity);
        }

        trace!(
            "frame: {} entities, {} submitted, {} rejected, {} culled, {} drawn",
            stats.entities,
            stats.triangles_submitted,
            stats.triangles_rejected,
            stats.triangles_culled,
            stats.triangles_drawn
        );
        stats
    }

    fn draw_entity(
        &mut self,
        pipeline: &GeometryPipeline,
        view_light: Vec3,
        entity: &mut Entity,
    ) -> FrameStats {
        let material = &entity.material;
        let lighting = material.lighting(view_light);
        let per_vertex = material.shader == ShaderKind::Gouraud;

        let model = entity.transform.model_matrix(entity.mesh.rotation());
        pipeline.project(&mut entity.mesh, &model, per_vertex.then_some(&lighting));

        let mut stats = FrameStats {
            entities: 1,
            ..FrameStats::default()
        };
        let frame = entity.mesh.frame();

        for face in entity.mesh.faces() {
            stats.triangles_submitted += 1;
            let Some(points) = frame.screen_triangle(face) else {
                stats.triangles_rejected += 1;
                continue;
            };
            let [a, b, c] = face.indices();

            let outcome = match material.shader {
                ShaderKind::Lambert => {
                    let corners = [
                        frame.view_positions[a],
                        frame.view_positions[b],
                        frame.view_positions[c],
                    ];
                    let color = lambert_color(corners, &lighting, material.color);
                    self.rasterizer.fill_triangle(
                        points,
                        &mut self.frame_buffer,
                        Shading::PerTriangle(color),
                    )
                }
                ShaderKind::Gouraud => {
                    let shader = GouraudShader::new(
                        [frame.intensities[a], frame.intensities[b], frame.intensities[c]],
                        material.color,
                    );
                    self.rasterizer.fill_triangle(
                        points,
                        &mut self.frame_buffer,
                        Shading::PerPixel(&shader),
                    )
                }
            };

            match outcome {
                RasterOutcome::Culled => stats.triangles_culled += 1,
                RasterOutcome::Drawn { .. } => stats.triangles_drawn += 1,
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::colors::BACKGROUND;
    use crate::light::PointLight;
    use crate::primitives::{cuboid, sphere};
    use crate::scene::Material;
    use crate::transform::Transform;

    fn scene_with(entity: Entity) -> Scene {
        let mut scene = Scene::new(
            Camera::at(Vec3::new(0.0, 0.0, 750.0)),
            PointLight::new(Vec3::new(0.0, 400.0, 600.0)),
        );
        scene.add(entity);
        scene
    }

    #[test]
    fn box_draws_front_faces_only() {
        let entity = Entity::new(
            "box",
            cuboid(100.0, 100.0, 100.0),
            Transform::default(),
            Material::default(),
        );
        let mut scene = scene_with(entity);
        let mut renderer = Renderer::new(160, 120);

        let stats = renderer.draw_scene(&mut scene);
        assert_eq!(stats.entities, 1);
        assert_eq!(stats.triangles_submitted, 12);
        assert_eq!(stats.triangles_rejected, 0);
        // Head-on: only the two front triangles face the camera, the four
        // side faces are edge-on.
        assert_eq!(stats.triangles_drawn, 2);
        assert_eq!(stats.triangles_culled, 10);
        assert_ne!(renderer.frame_buffer().get_pixel(80, 60), Some(BACKGROUND));
        assert_eq!(renderer.frame_buffer().get_pixel(2, 2), Some(BACKGROUND));
    }

    #[test]
    fn mesh_behind_camera_is_rejected() {
        let mut transform = Transform::default();
        transform.set_position_xyz(0.0, 0.0, 2000.0);
        let entity = Entity::new("s", sphere(50.0, 8), transform, Material::default());
        let mut scene = scene_with(entity);
        let mut renderer = Renderer::new(64, 48);

        let stats = renderer.draw_scene(&mut scene);
        assert_eq!(stats.triangles_rejected, stats.triangles_submitted);
        assert!(renderer
            .frame_buffer()
            .colors()
            .iter()
            .all(|&c| c == BACKGROUND));
    }

    #[test]
    fn every_frame_starts_from_a_clear_buffer() {
        let entity = Entity::new(
            "box",
            cuboid(100.0, 100.0, 100.0),
            Transform::default(),
            Material::default(),
        );
        let mut scene = scene_with(entity);
        let mut renderer = Renderer::new(64, 48);
        renderer.draw_scene(&mut scene);

        scene.entities.clear();
        let stats = renderer.draw_scene(&mut scene);
        assert_eq!(stats, FrameStats::default());
        assert!(renderer
            .frame_buffer()
            .depths()
            .iter()
            .all(|d| *d == f32::INFINITY));
    }

    #[test]
    fn resize_changes_the_next_frame() {
        let mut renderer = Renderer::new(64, 48);
        renderer.resize(32, 16);
        assert_eq!((renderer.width(), renderer.height()), (32, 16));
        assert_eq!(renderer.as_bytes().len(), 32 * 16 * 4);
    }
}
