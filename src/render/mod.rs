//! Pixel side of the pipeline: buffers, rasterization, shading and the
//! per-frame driver.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;
pub mod shader;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{EdgeFunctionRasterizer, FrontFace, RasterOutcome, Rasterizer};
pub use renderer::{FrameStats, Renderer};
pub use shader::{GouraudShader, PixelShader, ShaderKind, Shading};
