//! Minimal polygon-file (Wavefront OBJ subset) parser.
//!
//! Only three record kinds are read:
//!
//! ```text
//! v  x y z            vertex position
//! vn x y z            vertex normal
//! f  v[/vt][/vn] ...  face, 3 or more corners
//! ```
//!
//! Indices are 1-based; a negative index counts back from the current number
//! of records of that kind. Every other tag, blank line and `#` comment is
//! skipped, as is any line whose numbers do not parse. Index ranges are not
//! checked here; faces that point past the vertex list are dropped later by
//! the renderer.
//!
//! # Winding and normals
//!
//! An n-gon is fanned from its first corner, and each fan triangle is emitted
//! as `(first, i + 1, i)`: the last two corners are swapped so that files
//! authored counter-clockwise come out clockwise like the built-in shapes.
//!
//! When faces carry normal references, the referenced normals are summed per
//! vertex and the sum is **negated** before normalizing (see
//! [`ObjOptions::negate_supplied_normals`]). Without usable normals the mesh
//! falls back to [`Mesh::build_vertex_normals`].

use std::fs;
use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::math::vec3::Vec3;
use crate::mesh::{Face, Mesh};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read polygon file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjOptions {
    /// Flip accumulated `vn` normals before normalizing.
    ///
    /// On by default to keep the established behavior of this loader. The
    /// built-in shapes produce outward normals, so with this on a file's
    /// supplied normals end up facing the other way.
    pub negate_supplied_normals: bool,
}

impl Default for ObjOptions {
    fn default() -> Self {
        Self {
            negate_supplied_normals: true,
        }
    }
}

#[derive(Clone, Copy)]
struct Corner {
    vertex: usize,
    normal: Option<usize>,
}

/// Read and parse a polygon file with default options.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mesh = parse_obj(&text);
    debug!(
        "loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.face_count()
    );
    Ok(mesh)
}

/// Parse polygon-file text with default options.
pub fn parse_obj(text: &str) -> Mesh {
    parse_obj_with(text, ObjOptions::default())
}

pub fn parse_obj_with(text: &str, options: ObjOptions) -> Mesh {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut accumulated: Vec<Vec3> = Vec::new();
    let mut faces: Vec<Face> = Vec::new();
    let mut skipped = 0usize;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => match parse_vec3(tokens) {
                Some(p) => {
                    positions.push(p);
                    accumulated.push(Vec3::ZERO);
                }
                None => skipped += 1,
            },
            Some("vn") => match parse_vec3(tokens) {
                Some(n) => normals.push(n),
                None => skipped += 1,
            },
            Some("f") => {
                let corners: Option<Vec<Corner>> = tokens
                    .map(|tok| parse_corner(tok, positions.len(), normals.len()))
                    .collect();
                let Some(corners) = corners else {
                    skipped += 1;
                    continue;
                };

                for i in 1..corners.len().saturating_sub(1) {
                    let (a, b, c) = (corners[0], corners[i], corners[i + 1]);
                    faces.push(Face::new(a.vertex, c.vertex, b.vertex));

                    if let (Some(na), Some(nb), Some(nc)) = (a.normal, b.normal, c.normal) {
                        for (corner, normal) in [(a, na), (b, nb), (c, nc)] {
                            if let (Some(acc), Some(&n)) =
                                (accumulated.get_mut(corner.vertex), normals.get(normal))
                            {
                                *acc += n;
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    if skipped > 0 {
        debug!("polygon file: skipped {skipped} malformed records");
    }
    if faces.is_empty() {
        warn!("polygon file produced no faces");
    }

    let has_supplied_normals = accumulated.iter().any(|n| *n != Vec3::ZERO);
    let mut mesh = Mesh::new(positions, faces);

    if has_supplied_normals {
        let sign = if options.negate_supplied_normals {
            -1.0
        } else {
            1.0
        };
        mesh.set_normals(
            accumulated
                .iter()
                .map(|n| (*n * sign).normalize())
                .collect(),
        );
    } else {
        mesh.build_vertex_normals();
    }

    mesh
}

fn parse_vec3<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<Vec3> {
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some(Vec3::new(x, y, z))
}

/// Parse one `v[/vt][/vn]` group. Texture references are ignored.
fn parse_corner(token: &str, position_count: usize, normal_count: usize) -> Option<Corner> {
    let mut groups = token.split('/');
    let vertex = resolve_index(groups.next()?, position_count)?;
    let _texcoord = groups.next();
    let normal = match groups.next() {
        Some(s) if !s.is_empty() => Some(resolve_index(s, normal_count)?),
        _ => None,
    };
    Some(Corner { vertex, normal })
}

/// 1-based index, or negative index relative to `count`. Returns `None` when
/// the text is not an integer or the result would be negative.
fn resolve_index(s: &str, count: usize) -> Option<usize> {
    let i: isize = s.parse().ok()?;
    if i > 0 {
        Some(i as usize - 1)
    } else {
        usize::try_from(count as isize + i).ok()
    }
}
