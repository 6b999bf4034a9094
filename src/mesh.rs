//! Triangle mesh storage.
//!
//! A [`Mesh`] owns its model-space geometry plus a set of per-vertex buffers
//! that the geometry pipeline rewrites every frame (see [`FrameVertices`]).
//!
//! # Winding
//!
//! Triangles are wound **clockwise** when seen from outside the solid, so the
//! outward face normal is `(c - a) × (b - a)`. Every builder in
//! [`crate::primitives`] and the polygon-file parser emit this winding.

use crate::math::vec3::Vec3;

/// A triangle as three indices into [`Mesh::vertices`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    pub const fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

impl From<[usize; 3]> for Face {
    fn from(i: [usize; 3]) -> Self {
        Self::new(i[0], i[1], i[2])
    }
}

/// Un-normalized outward normal of a clockwise triangle. Its length is twice
/// the triangle's area.
#[inline]
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (c - a).cross(b - a)
}

/// Per-vertex outputs of the geometry pipeline.
///
/// Frame-scoped: every buffer is sized to the vertex count and fully
/// overwritten by each projection pass. Nothing carries over between frames.
#[derive(Clone, Debug, Default)]
pub struct FrameVertices {
    /// Screen x, screen y and NDC depth. Meaningless where `valid` is false.
    pub screen: Vec<Vec3>,
    /// False when the vertex failed the frustum test.
    pub valid: Vec<bool>,
    pub view_positions: Vec<Vec3>,
    pub view_normals: Vec<Vec3>,
    /// Precomputed light intensity in [0, 1]. Empty unless the pass was asked
    /// to light vertices.
    pub intensities: Vec<f32>,
}

impl FrameVertices {
    pub(crate) fn reset(&mut self, vertex_count: usize, with_intensity: bool) {
        self.screen.clear();
        self.screen.resize(vertex_count, Vec3::ZERO);
        self.valid.clear();
        self.valid.resize(vertex_count, false);
        self.view_positions.clear();
        self.view_positions.resize(vertex_count, Vec3::ZERO);
        self.view_normals.clear();
        self.view_normals.resize(vertex_count, Vec3::ZERO);
        self.intensities.clear();
        if with_intensity {
            self.intensities.resize(vertex_count, 0.0);
        }
    }

    /// Screen points of a face, or `None` if any corner is rejected or the
    /// face references a vertex that does not exist.
    pub fn screen_triangle(&self, face: &Face) -> Option<[Vec3; 3]> {
        let mut points = [Vec3::ZERO; 3];
        for (point, index) in points.iter_mut().zip(face.indices()) {
            if !*self.valid.get(index)? {
                return None;
            }
            *point = self.screen[index];
        }
        Some(points)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    normals: Vec<Vec3>,
    rotation: Vec3,
    frame: FrameVertices,
}

impl Mesh {
    /// Create a mesh from model-space vertices and clockwise faces.
    ///
    /// Normals are left empty; call [`Mesh::build_vertex_normals`] or
    /// [`Mesh::set_normals`] before lighting it.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces,
            ..Self::default()
        }
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Replace the per-vertex normals. The slice must have one entry per vertex.
    pub fn set_normals(&mut self, normals: Vec<Vec3>) {
        debug_assert_eq!(normals.len(), self.vertices.len());
        self.normals = normals;
    }

    /// Accumulated rotation angles (radians) about the local X, Y and Z axes.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Add to the accumulated rotation angles.
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation += Vec3::new(dx, dy, dz);
    }

    /// Derived buffers from the most recent projection pass.
    pub fn frame(&self) -> &FrameVertices {
        &self.frame
    }

    /// Vertices and normals alongside mutable access to the frame buffers.
    pub(crate) fn geometry_and_frame(&mut self) -> (&[Vec3], &[Vec3], &mut FrameVertices) {
        (&self.vertices, &self.normals, &mut self.frame)
    }

    /// True when every face index points at an existing vertex.
    pub fn is_well_formed(&self) -> bool {
        let n = self.vertices.len();
        self.faces
            .iter()
            .all(|f| f.a < n && f.b < n && f.c < n)
    }

    /// Smooth per-vertex normals from the faces that share each vertex.
    ///
    /// Each face adds its raw (area-scaled) normal to all three of its
    /// vertices; the sums are normalized at the end. A vertex with no faces,
    /// or whose contributions cancel, gets the zero vector.
    pub fn build_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for face in &self.faces {
            let [ia, ib, ic] = face.indices();
            let (Some(&a), Some(&b), Some(&c)) = (
                self.vertices.get(ia),
                self.vertices.get(ib),
                self.vertices.get(ic),
            ) else {
                continue;
            };

            let n = face_normal(a, b, c);
            for i in face.indices() {
                normals[i] += n;
            }
        }

        self.normals = normals.iter().map(Vec3::normalize).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> Mesh {
        // Unit square in the z=0 plane, clockwise seen from +Z.
        Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
            ],
            vec![Face::new(0, 1, 2), Face::new(0, 2, 3)],
        )
    }

    #[test]
    fn face_normal_points_out_of_clockwise_side() {
        let n = face_normal(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        assert!(n.z > 0.0);
    }

    #[test]
    fn vertex_normals_of_flat_quad() {
        let mut mesh = quad();
        mesh.build_vertex_normals();

        assert_eq!(mesh.normals().len(), 4);
        for n in mesh.normals() {
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn unused_vertex_gets_zero_normal() {
        let mut mesh = Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(9.0, 9.0, 9.0),
            ],
            vec![Face::new(0, 1, 2)],
        );
        mesh.build_vertex_normals();
        assert_eq!(mesh.normals()[3], Vec3::ZERO);
    }

    #[test]
    fn out_of_range_faces_are_ignored_for_normals() {
        let mut mesh = quad();
        mesh.faces.push(Face::new(0, 1, 42));
        assert!(!mesh.is_well_formed());

        mesh.build_vertex_normals();
        assert_eq!(mesh.normals().len(), 4);
    }

    #[test]
    fn rotate_accumulates() {
        let mut mesh = quad();
        mesh.rotate(0.1, 0.0, -0.2);
        mesh.rotate(0.1, 0.3, 0.0);
        assert_relative_eq!(mesh.rotation().x, 0.2);
        assert_relative_eq!(mesh.rotation().y, 0.3);
        assert_relative_eq!(mesh.rotation().z, -0.2);
    }

    #[test]
    fn screen_triangle_requires_all_corners_valid() {
        let mut mesh = quad();
        let (_, _, frame) = mesh.geometry_and_frame();
        frame.reset(4, false);
        frame.valid = vec![true, true, false, true];

        assert!(mesh.frame().screen_triangle(&Face::new(0, 1, 2)).is_none());
        assert!(mesh.frame().screen_triangle(&Face::new(0, 1, 3)).is_some());
        assert!(mesh.frame().screen_triangle(&Face::new(0, 1, 7)).is_none());
    }
}
