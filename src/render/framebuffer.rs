//! Color and depth buffers.
//!
//! The [`FrameBuffer`] owns a row-major ARGB8888 color buffer and a parallel
//! depth buffer of the same size. Depth holds NDC z (smaller is nearer);
//! +∞ marks a pixel nothing has covered yet this frame.

use std::path::Path;

use image::{ImageResult, RgbaImage};

use crate::colors::{self, unpack_rgba};

pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    /// Allocates cleared buffers for a `width` x `height` viewport.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![f32::INFINITY; size],
            width,
            height,
        }
    }

    /// Reallocates both buffers for a new viewport size and clears them.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Clears in place: color to opaque black, depth to +∞.
    pub fn clear(&mut self) {
        self.color_buffer.fill(colors::BACKGROUND);
        self.depth_buffer.fill(f32::INFINITY);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Depth test and write at an in-bounds pixel index.
    ///
    /// Writes only when `depth` is strictly less than the stored depth; the
    /// color is produced lazily so shading runs only for visible pixels.
    /// Returns whether the pixel was written.
    #[inline]
    pub(crate) fn write_if_nearer(
        &mut self,
        index: usize,
        depth: f32,
        color: impl FnOnce() -> u32,
    ) -> bool {
        if depth < self.depth_buffer[index] {
            self.depth_buffer[index] = depth;
            self.color_buffer[index] = color();
            true
        } else {
            false
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.color_buffer[idx])
    }

    /// Get the depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|idx| self.depth_buffer[idx])
    }

    pub fn colors(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depths(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// The color buffer as raw bytes in native word order, ready to stream
    /// into an ARGB8888 texture.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_buffer)
    }

    /// Copy the color buffer into an RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        let bytes = self
            .color_buffer
            .iter()
            .flat_map(|&c| unpack_rgba(c))
            .collect();
        // Length is width * height * 4 by construction.
        RgbaImage::from_raw(self.width, self.height, bytes)
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Write the color buffer to an image file; the format follows the
    /// extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.to_image().save(path)
    }
}
