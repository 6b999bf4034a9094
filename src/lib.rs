//! A CPU-based software-rendered 3D graphics pipeline.
//!
//! Meshes go through a fixed transform chain (model → world → view → clip →
//! NDC → screen), are rejected per vertex against the view frustum, and are
//! scan-converted by an edge-function rasterizer into a color buffer with a
//! depth buffer. Shading is flat Lambert per triangle or Gouraud per pixel.
//! Nothing here touches a GPU; the optional `window` feature only uses SDL2
//! to put the finished buffer on screen.
//!
//! # Quick Start
//!
//! ```ignore
//! use softraster::prelude::*;
//!
//! let mut scene = softraster::loader::default_scene();
//! let mut renderer = Renderer::new(800, 600);
//! let stats = renderer.draw_scene(&mut scene);
//! renderer.frame_buffer().save("frame.png")?;
//! ```

pub mod camera;
pub mod colors;
pub mod fps;
pub mod frustum;
pub mod light;
pub mod loader;
pub mod math;
pub mod mesh;
pub mod obj;
pub mod pipeline;
pub mod primitives;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;

pub use camera::{Camera, Key, KeyboardController};
pub use loader::{default_scene, load_scene, SceneError};
pub use mesh::{Face, Mesh};
pub use obj::{load_obj, parse_obj, LoadError};
pub use render::{FrameStats, Renderer};
pub use scene::{Entity, Material, Scene};
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softraster::prelude::*;
/// ```
pub mod prelude {
    // Camera & input
    pub use crate::camera::{Camera, Key, KeyboardController};
    pub use crate::fps::FpsCounter;

    // Scene
    pub use crate::light::PointLight;
    pub use crate::scene::{Entity, Material, Scene};
    pub use crate::transform::Transform;

    // Geometry
    pub use crate::mesh::{Face, Mesh};
    pub use crate::primitives::{cuboid, sphere, tetrahedron};

    // Math
    pub use crate::math::{Mat3, Mat4, Vec3, Vec4};

    // Rendering
    pub use crate::render::{FrameStats, FrontFace, Renderer, ShaderKind};

    #[cfg(feature = "window")]
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{
        EdgeFunctionRasterizer, FrameBuffer, GouraudShader, Rasterizer, Shading,
    };
}
