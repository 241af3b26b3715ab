//! Graphics device seam
//!
//! The renderer only needs textured unit quads, so a device is a handful of
//! calls. [`GlDevice`](super::GlDevice) drives OpenGL;
//! [`HeadlessDevice`](super::HeadlessDevice) records calls for tests.

use super::{Color, Rect};
use crate::texture::{TextureId, UvRect};

/// Pixel layout of uploaded texture data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Three bytes per pixel, no alpha
    Rgb8,
    /// Four bytes per pixel
    Rgba8,
}

impl PixelFormat {
    /// Bytes per pixel
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

/// Texture data handed to a device, rows top to bottom
#[derive(Debug, Clone, Copy)]
pub struct TextureUpload<'a> {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Layout of `data`
    pub format: PixelFormat,
    /// Packed pixel bytes
    pub data: &'a [u8],
}

/// Graphics device errors
#[derive(thiserror::Error, Debug)]
pub enum DeviceError {
    /// Shader compile or link failure
    #[error("Shader error: {0}")]
    Shader(String),

    /// Object creation failure
    #[error("Failed to create {0}")]
    Creation(String),

    /// Upload data does not match its declared size
    #[error("Texture data is {actual} bytes, expected {expected}")]
    DataSize {
        /// Required length
        expected: usize,
        /// Provided length
        actual: usize,
    },
}

/// Minimal GPU interface used by the renderer
pub trait GraphicsDevice {
    /// Upload a texture and return its handle
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> Result<TextureId, DeviceError>;

    /// Release a texture; unknown handles are ignored
    fn delete_texture(&mut self, id: TextureId);

    /// Set up pipeline state for a frame of `width` x `height` pixels
    fn begin_frame(&mut self, width: u32, height: u32);

    /// Restore pipeline state after a frame
    fn end_frame(&mut self);

    /// Draw the unit quad over `rect` sampling `uv` of `texture`
    fn draw_quad(&mut self, texture: TextureId, rect: Rect, uv: UvRect);

    /// Clear the full viewport
    fn clear(&mut self, color: Color);

    /// Release device objects other than textures
    fn cleanup(&mut self);
}

/// Checks upload data length against its declared dimensions
pub fn validate_upload(upload: &TextureUpload<'_>) -> Result<(), DeviceError> {
    let expected = upload.width as usize * upload.height as usize * upload.format.channels();
    if upload.data.len() == expected {
        Ok(())
    } else {
        Err(DeviceError::DataSize {
            expected,
            actual: upload.data.len(),
        })
    }
}
