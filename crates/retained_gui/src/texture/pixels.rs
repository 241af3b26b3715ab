//! Pixel sources
//!
//! Anything the loader can read pixels from. Implemented for the `image`
//! crate's buffers and for [`PixelBuffer`], the crate's own RGBA canvas.

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::render::Color;

/// Readable grid of RGBA pixels
pub trait PixelSource {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// RGBA value at `(x, y)`; both must be in range
    fn pixel(&self, x: u32, y: u32) -> [u8; 4];

    /// Whether every pixel has full alpha
    fn is_opaque(&self) -> bool;
}

impl PixelSource for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }

    fn is_opaque(&self) -> bool {
        self.pixels().all(|p| p.0[3] == u8::MAX)
    }
}

impl PixelSource for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let [r, g, b] = self.get_pixel(x, y).0;
        [r, g, b, u8::MAX]
    }

    fn is_opaque(&self) -> bool {
        true
    }
}

impl PixelSource for DynamicImage {
    fn width(&self) -> u32 {
        DynamicImage::width(self)
    }

    fn height(&self) -> u32 {
        DynamicImage::height(self)
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        image::GenericImageView::get_pixel(self, x, y).0
    }

    fn is_opaque(&self) -> bool {
        if !self.color().has_alpha() {
            return true;
        }
        image::GenericImageView::pixels(self).all(|(_, _, p)| p.0[3] == u8::MAX)
    }
}

/// Row-major RGBA canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
    opaque: bool,
}

impl PixelBuffer {
    /// Fully transparent canvas
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
            opaque: width == 0 || height == 0,
        }
    }

    /// Canvas filled with a single color
    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let data = [color.r, color.g, color.b, color.a]
            .repeat(width as usize * height as usize);
        Self {
            width,
            height,
            data,
            opaque: color.is_opaque(),
        }
    }

    /// Wrap existing RGBA bytes; `None` when the length does not match
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return None;
        }
        let opaque = data.chunks_exact(4).all(|p| p[3] == u8::MAX);
        Some(Self { width, height, data, opaque })
    }

    /// Copy `source` onto the origin of a `width` x `height` canvas
    ///
    /// Uncovered pixels stay transparent black. The canvas keeps the source's
    /// opacity flag so an opaque image is still uploaded without alpha.
    pub fn padded<S: PixelSource + ?Sized>(source: &S, width: u32, height: u32) -> Self {
        let mut canvas = Self::new(width, height);
        let copy_w = source.width().min(width);
        let copy_h = source.height().min(height);
        for y in 0..copy_h {
            for x in 0..copy_w {
                canvas.put(x, y, source.pixel(x, y));
            }
        }
        canvas.opaque = source.is_opaque();
        canvas
    }

    /// Write one pixel; out-of-range writes are ignored
    pub fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let offset = self.offset(x, y);
        self.data[offset..offset + 4].copy_from_slice(&rgba);
        if rgba[3] != u8::MAX {
            self.opaque = false;
        }
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

impl PixelSource for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = self.offset(x, y);
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.data[offset..offset + 4]);
        rgba
    }

    fn is_opaque(&self) -> bool {
        self.opaque
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_canvas_keeps_source_at_origin() {
        let source = PixelBuffer::solid(3, 2, Color::rgb(10, 20, 30));
        let padded = PixelBuffer::padded(&source, 4, 4);

        assert_eq!(padded.width(), 4);
        assert_eq!(padded.height(), 4);
        assert_eq!(padded.pixel(2, 1), [10, 20, 30, 255]);
        assert_eq!(padded.pixel(3, 0), [0, 0, 0, 0]);
        assert_eq!(padded.pixel(0, 2), [0, 0, 0, 0]);
        assert!(padded.is_opaque());
    }

    #[test]
    fn test_opacity_tracks_alpha() {
        let mut buffer = PixelBuffer::solid(2, 2, Color::rgb(1, 2, 3));
        assert!(buffer.is_opaque());
        buffer.put(1, 1, [1, 2, 3, 128]);
        assert!(!buffer.is_opaque());

        assert!(!PixelBuffer::solid(1, 1, Color::rgba(0, 0, 0, 0)).is_opaque());
        assert!(PixelBuffer::from_rgba(1, 1, vec![0, 0, 0]).is_none());
    }

    #[test]
    fn test_image_sources() {
        let rgb = RgbImage::from_pixel(2, 3, image::Rgb([5, 6, 7]));
        assert_eq!(PixelSource::width(&rgb), 2);
        assert_eq!(PixelSource::height(&rgb), 3);
        assert_eq!(PixelSource::pixel(&rgb, 1, 2), [5, 6, 7, 255]);
        assert!(PixelSource::is_opaque(&rgb));

        let mut rgba = RgbaImage::from_pixel(2, 2, image::Rgba([1, 1, 1, 255]));
        assert!(PixelSource::is_opaque(&rgba));
        rgba.put_pixel(0, 0, image::Rgba([1, 1, 1, 0]));
        assert!(!PixelSource::is_opaque(&rgba));

        let dynamic = DynamicImage::ImageRgba8(rgba);
        assert!(!PixelSource::is_opaque(&dynamic));
        assert_eq!(PixelSource::pixel(&dynamic, 0, 0), [1, 1, 1, 0]);
    }
}
