//! Scene description files.
//!
//! Scenes are written in RON. Every field except the object `shape` has a
//! default, so a minimal file is just a list of shapes:
//!
//! ```text
//! (
//!     camera: (eye: (0.0, 0.0, 750.0)),
//!     light: (position: (0.0, 400.0, 600.0)),
//!     objects: [
//!         (shape: Sphere(radius: 150.0, segments: 24)),
//!         (
//!             id: Some("crate"),
//!             shape: Box(w: 100.0, h: 100.0, d: 100.0),
//!             transform: (position: (250.0, 0.0, 0.0), rotation: (0.0, 0.01, 0.0)),
//!             material: (shader: lambert, color: (255.0, 128.0, 0.0, 255.0)),
//!         ),
//!         (shape: Mesh(path: "models/teapot.obj")),
//!     ],
//! )
//! ```
//!
//! `transform.rotation` is a spin: radians added to the mesh about x, y and z
//! every frame. `Mesh` paths are resolved relative to the scene file.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use crate::camera::Camera;
use crate::light::PointLight;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::obj::{load_obj, LoadError};
use crate::primitives::{cuboid, sphere, tetrahedron};
use crate::render::shader::ShaderKind;
use crate::scene::{Entity, Material, Scene};
use crate::transform::Transform;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene description: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("object {id}: {source}")]
    Mesh {
        id: String,
        #[source]
        source: LoadError,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneDef {
    #[serde(default)]
    pub camera: CameraDef,
    #[serde(default)]
    pub light: LightDef,
    #[serde(default)]
    pub objects: Vec<ObjectDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraDef {
    pub eye: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraDef {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 0.0],
            yaw: 0.0,
            pitch: 0.0,
            fov: 60.0,
            near: 0.1,
            far: 10_000.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LightDef {
    pub position: [f32; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectDef {
    #[serde(default)]
    pub id: Option<String>,
    pub shape: ShapeDef,
    #[serde(default)]
    pub transform: TransformDef,
    #[serde(default)]
    pub material: MaterialDef,
}

#[derive(Debug, Clone, Deserialize)]
pub enum ShapeDef {
    Sphere {
        #[serde(default = "default_radius")]
        radius: f32,
        #[serde(default = "default_segments")]
        segments: usize,
    },
    Box {
        #[serde(default = "default_box_side")]
        w: f32,
        #[serde(default = "default_box_side")]
        h: f32,
        #[serde(default = "default_box_side")]
        d: f32,
    },
    Tetra {
        #[serde(default = "default_tetra_size")]
        size: f32,
    },
    Mesh {
        path: PathBuf,
    },
}

fn default_radius() -> f32 {
    150.0
}

fn default_segments() -> usize {
    24
}

fn default_box_side() -> f32 {
    100.0
}

fn default_tetra_size() -> f32 {
    120.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TransformDef {
    pub position: [f32; 3],
    /// Spin in radians per frame.
    pub rotation: [f32; 3],
    pub scale: f32,
}

impl Default for TransformDef {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MaterialDef {
    pub color: [f32; 4],
    pub shader: ShaderKind,
    pub ambient: f32,
    pub albedo: f32,
    pub rainbow: bool,
}

impl Default for MaterialDef {
    fn default() -> Self {
        Self {
            color: [0.0, 255.0, 255.0, 255.0],
            shader: ShaderKind::Gouraud,
            ambient: 0.1,
            albedo: 0.6,
            rainbow: false,
        }
    }
}

impl From<&CameraDef> for Camera {
    fn from(def: &CameraDef) -> Self {
        Camera::new(
            Vec3::from(def.eye),
            def.yaw,
            def.pitch,
            def.fov,
            def.near,
            def.far,
        )
    }
}

impl From<&TransformDef> for Transform {
    fn from(def: &TransformDef) -> Self {
        Transform::new(
            Vec3::from(def.position),
            Vec3::from(def.rotation),
            def.scale,
        )
    }
}

impl From<&MaterialDef> for Material {
    fn from(def: &MaterialDef) -> Self {
        Material::new(def.color, def.shader, def.ambient, def.albedo).with_rainbow(def.rainbow)
    }
}

impl ShapeDef {
    fn build(&self, base_dir: &Path) -> Result<Mesh, LoadError> {
        Ok(match self {
            ShapeDef::Sphere { radius, segments } => sphere(*radius, *segments),
            ShapeDef::Box { w, h, d } => cuboid(*w, *h, *d),
            ShapeDef::Tetra { size } => tetrahedron(*size),
            ShapeDef::Mesh { path } => load_obj(base_dir.join(path))?,
        })
    }
}

impl SceneDef {
    /// Instantiate every object. `base_dir` anchors relative mesh paths.
    pub fn build(&self, base_dir: &Path) -> Result<Scene, SceneError> {
        let mut scene = Scene::new(
            Camera::from(&self.camera),
            PointLight::new(Vec3::from(self.light.position)),
        );

        for (i, object) in self.objects.iter().enumerate() {
            let id = object.id.clone().unwrap_or_else(|| format!("e{i}"));
            let mesh = object
                .shape
                .build(base_dir)
                .map_err(|source| SceneError::Mesh {
                    id: id.clone(),
                    source,
                })?;
            debug!(
                "entity {}: {} vertices, {} triangles, {} shading",
                id,
                mesh.vertex_count(),
                mesh.face_count(),
                object.material.shader
            );
            scene.add(Entity::new(
                id,
                mesh,
                Transform::from(&object.transform),
                Material::from(&object.material),
            ));
        }

        Ok(scene)
    }
}

/// Parse a scene description. Relative mesh paths resolve against
/// `base_dir`.
pub fn load_scene_str(text: &str, base_dir: &Path) -> Result<Scene, SceneError> {
    let def: SceneDef = ron::from_str(text)?;
    def.build(base_dir)
}

/// Load a scene description file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let scene = load_scene_str(&text, base_dir)?;

    info!(
        "Loaded scene {}: {} entities, {} triangles",
        path.display(),
        scene.entities.len(),
        scene.triangle_count()
    );
    Ok(scene)
}

/// The built-in demo: a sphere, a box and a tetrahedron in a row, seen from
/// (0, 0, 750) with the light above and behind the camera.
pub fn default_scene() -> Scene {
    let mut scene = Scene::new(
        Camera::at(Vec3::new(0.0, 0.0, 750.0)),
        PointLight::new(Vec3::new(0.0, 400.0, 600.0)),
    );

    scene
        .add(Entity::new(
            "sphere",
            sphere(default_radius(), default_segments()),
            Transform::new(Vec3::new(-300.0, 0.0, 0.0), Vec3::new(0.0, 0.01, 0.0), 1.0),
            Material::default(),
        ))
        .add(Entity::new(
            "box",
            cuboid(default_box_side(), default_box_side(), default_box_side()),
            Transform::new(Vec3::ZERO, Vec3::new(0.01, 0.013, 0.0), 1.0),
            Material::new([255.0, 160.0, 40.0, 255.0], ShaderKind::Lambert, 0.1, 0.6),
        ))
        .add(Entity::new(
            "tetra",
            tetrahedron(default_tetra_size()),
            Transform::new(Vec3::new(300.0, 0.0, 0.0), Vec3::new(0.0, 0.015, 0.01), 1.0),
            Material::default().with_rainbow(true),
        ));

    scene
}
