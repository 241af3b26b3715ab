//! Recording device for tests and display-less runs

use slotmap::SlotMap;

use super::device::validate_upload;
use crate::foundation::thread::ThreadAffinity;
use super::{Color, DeviceError, GraphicsDevice, PixelFormat, Rect, TextureUpload};
use crate::texture::{TextureId, UvRect};

/// One recorded device call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceCall {
    /// Texture upload
    CreateTexture {
        /// Assigned handle
        id: TextureId,
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
        /// Pixel layout
        format: PixelFormat,
    },
    /// Texture release
    DeleteTexture(TextureId),
    /// Frame setup
    BeginFrame {
        /// Viewport width
        width: u32,
        /// Viewport height
        height: u32,
    },
    /// Frame teardown
    EndFrame,
    /// Quad draw
    DrawQuad {
        /// Sampled texture
        texture: TextureId,
        /// Absolute target
        rect: Rect,
        /// Sampled region
        uv: UvRect,
    },
    /// Viewport clear
    Clear(Color),
    /// Device object release
    Cleanup,
}

/// Device that keeps textures in memory and records every call
///
/// Bound to its creating thread like a real context.
#[derive(Debug)]
pub struct HeadlessDevice {
    textures: SlotMap<TextureId, (u32, u32, PixelFormat)>,
    calls: Vec<DeviceCall>,
    in_frame: bool,
    affinity: ThreadAffinity,
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDevice {
    /// Create an empty device owned by the calling thread
    pub fn new() -> Self {
        Self {
            textures: SlotMap::with_key(),
            calls: Vec::new(),
            in_frame: false,
            affinity: ThreadAffinity::current(),
        }
    }

    /// Calls recorded so far
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Forget recorded calls
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Recorded quad draws
    pub fn draws(&self) -> Vec<(TextureId, Rect, UvRect)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                DeviceCall::DrawQuad { texture, rect, uv } => Some((texture, rect, uv)),
                _ => None,
            })
            .collect()
    }

    /// Size and format of a live texture
    pub fn texture_size(&self, id: TextureId) -> Option<(u32, u32, PixelFormat)> {
        self.textures.get(id).copied()
    }

    /// Number of textures not yet deleted
    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    /// Whether a frame is open
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn create_texture(&mut self, upload: &TextureUpload<'_>) -> Result<TextureId, DeviceError> {
        self.affinity.ensure("HeadlessDevice::create_texture");
        validate_upload(upload)?;
        let id = self.textures.insert((upload.width, upload.height, upload.format));
        self.calls.push(DeviceCall::CreateTexture {
            id,
            width: upload.width,
            height: upload.height,
            format: upload.format,
        });
        Ok(id)
    }

    fn delete_texture(&mut self, id: TextureId) {
        self.affinity.ensure("HeadlessDevice::delete_texture");
        if self.textures.remove(id).is_some() {
            self.calls.push(DeviceCall::DeleteTexture(id));
        }
    }

    fn begin_frame(&mut self, width: u32, height: u32) {
        self.affinity.ensure("HeadlessDevice::begin_frame");
        self.in_frame = true;
        self.calls.push(DeviceCall::BeginFrame { width, height });
    }

    fn end_frame(&mut self) {
        self.affinity.ensure("HeadlessDevice::end_frame");
        self.in_frame = false;
        self.calls.push(DeviceCall::EndFrame);
    }

    fn draw_quad(&mut self, texture: TextureId, rect: Rect, uv: UvRect) {
        self.affinity.ensure("HeadlessDevice::draw_quad");
        self.calls.push(DeviceCall::DrawQuad { texture, rect, uv });
    }

    fn clear(&mut self, color: Color) {
        self.affinity.ensure("HeadlessDevice::clear");
        self.calls.push(DeviceCall::Clear(color));
    }

    fn cleanup(&mut self) {
        self.affinity.ensure("HeadlessDevice::cleanup");
        self.calls.push(DeviceCall::Cleanup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_size_checked() {
        let mut device = HeadlessDevice::new();
        let bad = TextureUpload {
            width: 2,
            height: 2,
            format: PixelFormat::Rgba8,
            data: &[0; 12],
        };
        assert!(matches!(
            device.create_texture(&bad),
            Err(DeviceError::DataSize { expected: 16, actual: 12 })
        ));

        let good = TextureUpload { format: PixelFormat::Rgb8, ..bad };
        let id = device.create_texture(&good).unwrap();
        assert_eq!(device.texture_size(id), Some((2, 2, PixelFormat::Rgb8)));

        device.delete_texture(id);
        device.delete_texture(id);
        assert_eq!(device.live_textures(), 0);
        assert_eq!(device.calls().len(), 2);
    }

    #[test]
    fn test_draw_calls_rejected_off_owner_thread() {
        let texture = HeadlessDevice::new()
            .create_texture(&TextureUpload {
                width: 1,
                height: 1,
                format: PixelFormat::Rgb8,
                data: &[0; 3],
            })
            .unwrap();

        let mut device = HeadlessDevice::new();
        let draw = std::thread::scope(|scope| {
            scope
                .spawn(|| device.draw_quad(texture, Rect::UNIT, UvRect::FULL))
                .join()
        });
        assert!(draw.is_err());

        let clear = std::thread::scope(|scope| scope.spawn(|| device.clear(Color::BLACK)).join());
        assert!(clear.is_err());
        assert!(device.calls().is_empty());

        device.clear(Color::WHITE);
        assert_eq!(device.calls(), &[DeviceCall::Clear(Color::WHITE)]);
    }
}
