//! Scene graph: a camera, one point light and a flat list of entities.

use crate::camera::Camera;
use crate::colors::{hsl_to_rgb, Rgba};
use crate::light::{PointLight, SurfaceLighting};
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::render::shader::ShaderKind;
use crate::transform::Transform;

/// Degrees the rainbow hue advances each frame.
pub const RAINBOW_STEP_DEGREES: f32 = 2.0;

/// Surface appearance of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color, channels 0-255.
    pub color: Rgba,
    pub shader: ShaderKind,
    pub ambient: f32,
    pub albedo: f32,
    /// Cycle the base color through the hue wheel, one step per frame.
    pub rainbow: bool,
    hue: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::new([0.0, 255.0, 255.0, 255.0], ShaderKind::Gouraud, 0.1, 0.6)
    }
}

impl Material {
    pub fn new(color: Rgba, shader: ShaderKind, ambient: f32, albedo: f32) -> Self {
        Self {
            color,
            shader,
            ambient,
            albedo,
            rainbow: false,
            hue: 0.0,
        }
    }

    pub fn with_rainbow(mut self, rainbow: bool) -> Self {
        self.rainbow = rainbow;
        self
    }

    /// Current rainbow hue in degrees, [0, 360).
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Advance the hue one step and recolor. No-op unless `rainbow` is set.
    pub fn advance_rainbow(&mut self) {
        if !self.rainbow {
            return;
        }
        self.hue = (self.hue + RAINBOW_STEP_DEGREES) % 360.0;
        let [r, g, b] = hsl_to_rgb(self.hue / 360.0, 1.0, 0.5);
        self.color = [r, g, b, 255.0];
    }

    /// Lighting parameters for a light already in view space.
    pub fn lighting(&self, view_light: Vec3) -> SurfaceLighting {
        SurfaceLighting {
            light: view_light,
            ambient: self.ambient,
            albedo: self.albedo,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: String,
    pub mesh: Mesh,
    pub transform: Transform,
    pub material: Material,
}

impl Entity {
    pub fn new(id: impl Into<String>, mesh: Mesh, transform: Transform, material: Material) -> Self {
        Self {
            id: id.into(),
            mesh,
            transform,
            material,
        }
    }

    /// Per-frame state update: spin the mesh and step the rainbow.
    pub fn tick(&mut self) {
        let spin = self.transform.spin();
        self.mesh.rotate(spin.x, spin.y, spin.z);
        self.material.advance_rainbow();
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub light: PointLight,
    pub entities: Vec<Entity>,
}

impl Scene {
    pub fn new(camera: Camera, light: PointLight) -> Self {
        Self {
            camera,
            light,
            entities: Vec::new(),
        }
    }

    pub fn add(&mut self, entity: Entity) -> &mut Self {
        self.entities.push(entity);
        self
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn triangle_count(&self) -> usize {
        self.entities.iter().map(|e| e.mesh.face_count()).sum()
    }
}
