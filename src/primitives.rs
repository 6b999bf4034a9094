//! Builders for the canonical shapes.
//!
//! Each builder returns a plain [`Mesh`] with clockwise outward winding and
//! smooth vertex normals already built. Shapes differ only in their starting
//! geometry.

use std::f32::consts::PI;

use crate::math::vec3::Vec3;
use crate::mesh::{Face, Mesh};

/// Axis-aligned box centered on the origin: 8 vertices, 12 triangles.
pub fn cuboid(width: f32, height: f32, depth: f32) -> Mesh {
    let w = width / 2.0;
    let h = height / 2.0;
    let d = depth / 2.0;

    let vertices = vec![
        Vec3::new(-w, -h, -d),
        Vec3::new(w, -h, -d),
        Vec3::new(w, h, -d),
        Vec3::new(-w, h, -d),
        Vec3::new(-w, -h, d),
        Vec3::new(w, -h, d),
        Vec3::new(w, h, d),
        Vec3::new(-w, h, d),
    ];

    let faces = [
        // Back (-Z)
        [1, 3, 0],
        [1, 2, 3],
        // Front (+Z)
        [4, 6, 5],
        [4, 7, 6],
        // Left (-X)
        [0, 7, 4],
        [0, 3, 7],
        // Right (+X)
        [5, 2, 1],
        [5, 6, 2],
        // Top (+Y)
        [3, 6, 7],
        [3, 2, 6],
        // Bottom (-Y)
        [0, 5, 1],
        [0, 4, 5],
    ]
    .into_iter()
    .map(Face::from)
    .collect();

    let mut mesh = Mesh::new(vertices, faces);
    mesh.build_vertex_normals();
    mesh
}

/// Latitude/longitude sphere centered on the origin with its poles on ±Z.
///
/// There are `segments + 1` rings (`theta` from 0 to π inclusive) of
/// `segments` vertices each (`phi` over a full turn, exclusive). The seam is
/// closed by wrapping the column index modulo `segments`, so no vertex column
/// is duplicated. Pole rings collapse to a point; their zero-area triangles
/// fall out at rasterization.
///
/// Produces `(segments + 1) * segments` vertices and `2 * segments²` faces.
pub fn sphere(radius: f32, segments: usize) -> Mesh {
    let mut vertices = Vec::with_capacity((segments + 1) * segments);

    for i in 0..=segments {
        let theta = i as f32 * PI / segments as f32;
        for j in 0..segments {
            let phi = j as f32 * 2.0 * PI / segments as f32;
            vertices.push(Vec3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
            ));
        }
    }

    let cols = segments;
    let mut faces = Vec::with_capacity(2 * segments * segments);
    for i in 0..segments {
        for j in 0..segments {
            let a = i * cols + j;
            let b = i * cols + (j + 1) % cols;
            let c = (i + 1) * cols + j;
            let d = (i + 1) * cols + (j + 1) % cols;
            faces.push(Face::new(a, b, d));
            faces.push(Face::new(a, d, c));
        }
    }

    let mut mesh = Mesh::new(vertices, faces);
    mesh.build_vertex_normals();
    mesh
}

/// Tetrahedron with its apex on +Y: 4 vertices, 4 triangles.
pub fn tetrahedron(size: f32) -> Mesh {
    let s = size / 2.0;

    let vertices = vec![
        Vec3::new(0.0, s, 0.0),
        Vec3::new(-s, -s, s),
        Vec3::new(s, -s, s),
        Vec3::new(0.0, -s, -s),
    ];

    let faces = vec![
        Face::new(0, 2, 1),
        Face::new(0, 3, 2),
        Face::new(0, 1, 3),
        Face::new(1, 2, 3),
    ];

    let mut mesh = Mesh::new(vertices, faces);
    mesh.build_vertex_normals();
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::face_normal;
    use approx::assert_relative_eq;

    fn centroid(mesh: &Mesh) -> Vec3 {
        let sum = mesh
            .vertices()
            .iter()
            .fold(Vec3::ZERO, |acc, &v| acc + v);
        sum / mesh.vertex_count() as f32
    }

    /// Every non-degenerate face normal points away from the mesh center.
    fn assert_outward(mesh: &Mesh) {
        let center = centroid(mesh);
        for face in mesh.faces() {
            let [a, b, c] = face.indices().map(|i| mesh.vertices()[i]);
            let n = face_normal(a, b, c);
            if n.magnitude() < 1e-3 {
                continue;
            }
            let mid = (a + b + c) / 3.0;
            assert!(n.dot(mid - center) > 0.0, "inward face {face:?}");
        }
    }

    #[test]
    fn box_has_8_vertices_and_12_faces() {
        let mesh = cuboid(100.0, 100.0, 100.0);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 12);
        assert!(mesh
            .faces()
            .iter()
            .flat_map(|f| f.indices())
            .all(|i| i < 8));
    }

    #[test]
    fn box_faces_point_outward() {
        assert_outward(&cuboid(100.0, 60.0, 30.0));
    }

    #[test]
    fn box_normals_are_unit_length() {
        let mesh = cuboid(100.0, 100.0, 100.0);
        assert_eq!(mesh.normals().len(), 8);
        for n in mesh.normals() {
            assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn sphere_counts() {
        let mesh = sphere(150.0, 12);
        assert_eq!(mesh.vertex_count(), 13 * 12);
        assert_eq!(mesh.face_count(), 2 * 12 * 12);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn coarse_sphere_keeps_the_ring_formula() {
        let mesh = sphere(1.0, 2);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 8);
        assert!(mesh.is_well_formed());

        assert_eq!(sphere(1.0, 1).vertex_count(), 2);
        assert_eq!(sphere(1.0, 1).face_count(), 2);
        assert_eq!(sphere(1.0, 0).face_count(), 0);
    }

    #[test]
    fn sphere_seam_wraps_to_first_column() {
        let n = 8;
        let mesh = sphere(1.0, n);

        // Faces that start in the last column must reach back to column 0
        // of the same rings instead of a duplicated column.
        for ring in 0..n {
            let last = ring * n + (n - 1);
            let wedge: Vec<_> = mesh.faces().iter().filter(|f| f.a == last).collect();
            assert_eq!(wedge.len(), 2);
            assert_eq!(wedge[0].b, ring * n);
            assert_eq!(wedge[0].c, (ring + 1) * n);
        }

        // No two vertices in a ring coincide away from the poles.
        for ring in 1..n {
            let row = &mesh.vertices()[ring * n..(ring + 1) * n];
            for (i, a) in row.iter().enumerate() {
                for b in &row[i + 1..] {
                    assert!((*a - *b).magnitude() > 1e-4);
                }
            }
        }
    }

    #[test]
    fn sphere_faces_point_outward() {
        assert_outward(&sphere(10.0, 10));
    }

    #[test]
    fn sphere_normals_match_radial_direction() {
        let mesh = sphere(5.0, 16);
        // Skip the pole rings where all vertices coincide.
        for (v, n) in mesh.vertices().iter().zip(mesh.normals()).skip(16).take(15 * 16) {
            let radial = v.normalize();
            assert!(radial.dot(*n) > 0.95);
        }
    }

    #[test]
    fn tetrahedron_counts_and_winding() {
        let mesh = tetrahedron(120.0);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 4);
        assert_outward(&mesh);
    }
}
