//! Geometry pipeline: model space to screen space, one vertex at a time.
//!
//! For each vertex of a mesh:
//!
//! 1. model → world → view → clip with one combined matrix
//! 2. frustum test on the clip position (see [`crate::frustum`])
//! 3. perspective divide to NDC
//! 4. NDC → screen, with y flipped so the origin is top-left
//!
//! Accepted vertices also get a view-space position and normal, and
//! optionally a Lambert intensity for Gouraud interpolation. Results land in
//! the mesh's [`FrameVertices`](crate::mesh::FrameVertices), which are fully
//! overwritten on every pass.

use crate::camera::Camera;
use crate::frustum::FrustumTest;
use crate::light::SurfaceLighting;
use crate::math::mat3::Mat3;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Mesh;
use crate::projection::Projection;

/// Per-frame camera state shared by every mesh projected in that frame.
#[derive(Debug, Clone, Copy)]
pub struct GeometryPipeline {
    view: Mat4,
    projection: Mat4,
    width: u32,
    height: u32,
    frustum: FrustumTest,
}

impl GeometryPipeline {
    pub fn new(camera: &Camera, width: u32, height: u32, frustum: FrustumTest) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: camera
                .projection(Projection::aspect_of(width, height))
                .matrix(),
            width,
            height,
            frustum,
        }
    }

    /// World → view matrix of this frame.
    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    /// NDC → screen coordinates. Depth is passed through unchanged.
    #[inline]
    pub fn ndc_to_screen(&self, ndc: Vec3) -> Vec3 {
        Vec3::new(
            (ndc.x * 0.5 + 0.5) * self.width as f32,
            (-ndc.y * 0.5 + 0.5) * self.height as f32,
            ndc.z,
        )
    }

    /// Project every vertex of `mesh` with the given model matrix.
    ///
    /// With `lighting`, per-vertex intensities are computed in view space
    /// from each vertex's own normal and direction to the light. Returns how
    /// many vertices the frustum test rejected.
    pub fn project(
        &self,
        mesh: &mut Mesh,
        model: &Mat4,
        lighting: Option<&SurfaceLighting>,
    ) -> usize {
        let model_view = self.view * *model;
        let mvp = self.projection * model_view;
        let normal_matrix = Mat3::from(&model_view);

        let (vertices, normals, frame) = mesh.geometry_and_frame();
        frame.reset(vertices.len(), lighting.is_some());

        let mut rejected = 0;
        for (i, &vertex) in vertices.iter().enumerate() {
            let clip = mvp * Vec4::from(vertex);
            if !self.frustum.accepts(clip) {
                rejected += 1;
                continue;
            }

            frame.valid[i] = true;
            frame.screen[i] = self.ndc_to_screen(clip.to_ndc());

            let view_position = (model_view * Vec4::from(vertex)).to_vec3();
            let view_normal = normals
                .get(i)
                .map_or(Vec3::ZERO, |&n| (normal_matrix * n).normalize());
            frame.view_positions[i] = view_position;
            frame.view_normals[i] = view_normal;

            if let Some(lighting) = lighting {
                frame.intensities[i] = lighting.intensity_at(view_position, view_normal);
            }
        }

        rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Face;
    use crate::primitives::cuboid;
    use approx::assert_relative_eq;

    fn pipeline() -> GeometryPipeline {
        let camera = Camera::at(Vec3::new(0.0, 0.0, 750.0));
        GeometryPipeline::new(&camera, 800, 600, FrustumTest::default())
    }

    #[test]
    fn origin_lands_mid_screen() {
        let mut mesh = Mesh::new(vec![Vec3::ZERO], vec![]);
        let rejected = pipeline().project(&mut mesh, &Mat4::identity(), None);

        assert_eq!(rejected, 0);
        let frame = mesh.frame();
        assert!(frame.valid[0]);
        assert_relative_eq!(frame.screen[0].x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(frame.screen[0].y, 300.0, epsilon = 1e-3);
        assert!(frame.screen[0].z > -1.0 && frame.screen[0].z < 1.0);
        assert_relative_eq!(frame.view_positions[0].z, -750.0, epsilon = 1e-3);
    }

    #[test]
    fn screen_y_points_down() {
        let mut mesh = Mesh::new(vec![Vec3::new(0.0, 100.0, 0.0)], vec![]);
        pipeline().project(&mut mesh, &Mat4::identity(), None);
        assert!(mesh.frame().screen[0].y < 300.0);
    }

    #[test]
    fn nearer_vertex_has_smaller_depth() {
        let mut mesh = Mesh::new(
            vec![Vec3::new(0.0, 0.0, 50.0), Vec3::new(0.0, 0.0, -50.0)],
            vec![],
        );
        pipeline().project(&mut mesh, &Mat4::identity(), None);
        let screen = &mesh.frame().screen;
        assert!(screen[0].z < screen[1].z);
    }

    #[test]
    fn vertex_at_eye_is_marked_invalid() {
        let mut mesh = Mesh::new(
            vec![Vec3::new(0.0, 0.0, 750.0), Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
            vec![Face::new(0, 1, 2)],
        );
        let rejected = pipeline().project(&mut mesh, &Mat4::identity(), None);

        assert_eq!(rejected, 1);
        assert_eq!(mesh.frame().valid, vec![false, true, true]);
        assert!(mesh.frame().screen_triangle(&Face::new(0, 1, 2)).is_none());
    }

    #[test]
    fn buffers_are_sized_and_overwritten() {
        let mut mesh = cuboid(100.0, 100.0, 100.0);
        let pipeline = pipeline();

        pipeline.project(&mut mesh, &Mat4::identity(), None);
        assert_eq!(mesh.frame().screen.len(), 8);
        assert!(mesh.frame().intensities.is_empty());

        // Move it behind the camera: nothing from the previous pass survives.
        pipeline.project(&mut mesh, &Mat4::translation(0.0, 0.0, 2000.0), None);
        assert!(mesh.frame().valid.iter().all(|v| !v));
    }

    #[test]
    fn view_normals_are_unit_and_rotate_with_the_model() {
        let mut mesh = cuboid(100.0, 100.0, 100.0);
        let model = Mat4::rotation_y(0.7);
        pipeline().project(&mut mesh, &model, None);

        for n in &mesh.frame().view_normals {
            assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn intensities_computed_when_lit() {
        let mut mesh = cuboid(100.0, 100.0, 100.0);
        let lighting = SurfaceLighting {
            light: Vec3::new(0.0, 0.0, 0.0),
            ambient: 0.1,
            albedo: 0.6,
        };
        pipeline().project(&mut mesh, &Mat4::identity(), Some(&lighting));

        let frame = mesh.frame();
        assert_eq!(frame.intensities.len(), 8);
        assert!(frame.intensities.iter().all(|&i| (0.1..=0.7).contains(&i)));
        // Front corners (+Z) see the light at the eye better than back ones.
        let front = mesh.vertices().iter().position(|v| v.z > 0.0).unwrap();
        let back = mesh.vertices().iter().position(|v| v.z < 0.0).unwrap();
        assert!(frame.intensities[front] > frame.intensities[back]);
    }
}
