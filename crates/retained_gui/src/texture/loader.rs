//! # Texture Loader
//!
//! Uploads pixel sources to a [`GraphicsDevice`], padding non-power-of-two
//! sources onto the smallest power-of-two canvas that fits. Every created
//! handle is tracked so [`TextureLoader::clean`] can release them all.

use crate::config::TextureConfig;
use crate::render::{GraphicsDevice, PixelFormat, TextureUpload};

use super::{
    DiagnosticSink, LogSink, PixelBounds, PixelBuffer, PixelSource, ResourceLocator, SearchPathLocator,
    Texture, TextureError, TextureId, UvRect,
};

/// Side lengths a device texture may have, ascending
pub const SUPPORTED_SIZES: [u32; 31] = {
    let mut sizes = [0; 31];
    let mut i = 0;
    while i < sizes.len() {
        sizes[i] = 1 << i;
        i += 1;
    }
    sizes
};

/// Whether `size` can be uploaded without padding
pub fn is_supported_size(size: u32) -> bool {
    SUPPORTED_SIZES.contains(&size)
}

/// Smallest supported size that is at least `size`
pub fn next_supported_size(size: u32) -> Option<u32> {
    SUPPORTED_SIZES.iter().copied().find(|&supported| supported >= size)
}

/// Creates device textures and owns their handles
pub struct TextureLoader {
    locator: Box<dyn ResourceLocator>,
    diagnostics: Box<dyn DiagnosticSink>,
    registry: Vec<TextureId>,
}

impl std::fmt::Debug for TextureLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureLoader")
            .field("registered", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl TextureLoader {
    /// Create a loader resolving names through `locator`
    pub fn new(locator: Box<dyn ResourceLocator>) -> Self {
        Self {
            locator,
            diagnostics: Box::new(LogSink),
            registry: Vec::new(),
        }
    }

    /// Create a loader searching the configured resource directories
    pub fn from_config(config: &TextureConfig) -> Self {
        Self::new(Box::new(SearchPathLocator::new(config.resource_dirs.iter())))
    }

    /// Replace where load failures are reported
    pub fn set_diagnostics(&mut self, sink: Box<dyn DiagnosticSink>) {
        self.diagnostics = sink;
    }

    /// Number of live handles owned by this loader
    pub fn registered(&self) -> usize {
        self.registry.len()
    }

    /// Upload a whole source
    ///
    /// Power-of-two sources cover UV `[0, 0, 1, 1]`; padded sources cover
    /// `[0, 0, w / padded_w, h / padded_h]`.
    pub fn load<D, S>(&mut self, device: &mut D, source: &S) -> Result<Texture, TextureError>
    where
        D: GraphicsDevice + ?Sized,
        S: PixelSource + ?Sized,
    {
        let (width, height) = (source.width(), source.height());
        let (texture_w, texture_h) = padded_size(width, height)?;
        let id = self.upload(device, source, texture_w, texture_h)?;

        let uv = if texture_w == width && texture_h == height {
            UvRect::FULL
        } else {
            UvRect::new(0.0, 0.0, width as f32 / texture_w as f32, height as f32 / texture_h as f32)
        };

        Ok(Texture {
            id,
            width: texture_w,
            height: texture_h,
            uv,
        })
    }

    /// Upload a source and expose only `bounds` of it
    pub fn load_part<D, S>(&mut self, device: &mut D, source: &S, bounds: PixelBounds) -> Result<Texture, TextureError>
    where
        D: GraphicsDevice + ?Sized,
        S: PixelSource + ?Sized,
    {
        let (width, height) = (source.width(), source.height());
        if bounds.min_x >= bounds.max_x || bounds.min_y >= bounds.max_y || bounds.max_x > width || bounds.max_y > height
        {
            return Err(TextureError::InvalidBounds { bounds, width, height });
        }

        let (texture_w, texture_h) = padded_size(width, height)?;
        let id = self.upload(device, source, texture_w, texture_h)?;

        Ok(Texture {
            id,
            width: texture_w,
            height: texture_h,
            uv: part_uv(bounds, texture_w, texture_h),
        })
    }

    /// Load a named image resource
    ///
    /// Lookup, decode and upload failures are reported to the diagnostic sink.
    pub fn load_named<D>(&mut self, device: &mut D, name: &str) -> Option<Texture>
    where
        D: GraphicsDevice + ?Sized,
    {
        match self.open(name).and_then(|image| self.load(device, &image)) {
            Ok(texture) => Some(texture),
            Err(e) => {
                self.diagnostics.report(&format!("Failed to load texture '{name}': {e}"));
                None
            }
        }
    }

    /// Load part of a named image resource
    pub fn load_named_part<D>(&mut self, device: &mut D, name: &str, bounds: PixelBounds) -> Option<Texture>
    where
        D: GraphicsDevice + ?Sized,
    {
        match self.open(name).and_then(|image| self.load_part(device, &image, bounds)) {
            Ok(texture) => Some(texture),
            Err(e) => {
                self.diagnostics.report(&format!("Failed to load part of texture '{name}': {e}"));
                None
            }
        }
    }

    /// Release every texture this loader created
    pub fn clean<D: GraphicsDevice + ?Sized>(&mut self, device: &mut D) {
        if self.registry.is_empty() {
            return;
        }
        log::debug!("Releasing {} textures", self.registry.len());
        for id in self.registry.drain(..) {
            device.delete_texture(id);
        }
    }

    fn open(&self, name: &str) -> Result<image::DynamicImage, TextureError> {
        let path = self
            .locator
            .locate(name)
            .ok_or_else(|| TextureError::NotFound(name.to_string()))?;
        log::trace!("Decoding texture {}", path.display());
        Ok(image::open(&path)?)
    }

    fn upload<D, S>(&mut self, device: &mut D, source: &S, texture_w: u32, texture_h: u32) -> Result<TextureId, TextureError>
    where
        D: GraphicsDevice + ?Sized,
        S: PixelSource + ?Sized,
    {
        let id = if texture_w == source.width() && texture_h == source.height() {
            upload_direct(device, source)?
        } else {
            log::debug!(
                "Padding {}x{} texture to {texture_w}x{texture_h}",
                source.width(),
                source.height()
            );
            upload_direct(device, &PixelBuffer::padded(source, texture_w, texture_h))?
        };
        self.registry.push(id);
        Ok(id)
    }
}

fn padded_size(width: u32, height: u32) -> Result<(u32, u32), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::EmptySource { width, height });
    }
    match (next_supported_size(width), next_supported_size(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(TextureError::SizeExceeded { width, height }),
    }
}

fn part_uv(bounds: PixelBounds, texture_w: u32, texture_h: u32) -> UvRect {
    let (w, h) = (texture_w as f32, texture_h as f32);
    UvRect::new(
        bounds.min_x as f32 / w,
        bounds.min_y as f32 / h,
        bounds.max_x as f32 / w,
        bounds.max_y as f32 / h,
    )
}

fn upload_direct<D, S>(device: &mut D, source: &S) -> Result<TextureId, TextureError>
where
    D: GraphicsDevice + ?Sized,
    S: PixelSource + ?Sized,
{
    let (width, height) = (source.width(), source.height());
    let format = if source.is_opaque() { PixelFormat::Rgb8 } else { PixelFormat::Rgba8 };
    let channels = format.channels();

    let mut data = Vec::with_capacity(width as usize * height as usize * channels);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&source.pixel(x, y)[..channels]);
        }
    }

    let id = device.create_texture(&TextureUpload {
        width,
        height,
        format,
        data: &data,
    })?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use approx::assert_relative_eq;

    use super::*;
    use crate::render::{Color, DeviceCall, HeadlessDevice};

    fn loader() -> TextureLoader {
        TextureLoader::new(Box::new(SearchPathLocator::default()))
    }

    #[test]
    fn test_supported_sizes() {
        assert_eq!(SUPPORTED_SIZES[0], 1);
        assert_eq!(SUPPORTED_SIZES[30], 1 << 30);
        assert!(SUPPORTED_SIZES.windows(2).all(|pair| pair[0] < pair[1]));

        assert!(is_supported_size(2));
        assert!(is_supported_size(4));
        assert!(is_supported_size(256));
        assert!(!is_supported_size(3));
        assert!(!is_supported_size(0));

        assert_eq!(next_supported_size(3), Some(4));
        assert_eq!(next_supported_size(200), Some(256));
        assert_eq!(next_supported_size(u32::MAX), None);
    }

    #[test]
    fn test_power_of_two_uploads_directly() {
        let mut device = HeadlessDevice::new();
        let mut loader = loader();

        let texture = loader
            .load(&mut device, &PixelBuffer::solid(64, 32, Color::rgb(1, 2, 3)))
            .unwrap();

        assert_eq!(texture.uv, UvRect::FULL);
        assert_eq!((texture.width, texture.height), (64, 32));
        assert_eq!(device.texture_size(texture.id), Some((64, 32, PixelFormat::Rgb8)));
    }

    #[test]
    fn test_non_power_of_two_is_padded() {
        let mut device = HeadlessDevice::new();
        let mut loader = loader();

        let texture = loader
            .load(&mut device, &PixelBuffer::solid(100, 50, Color::rgba(9, 9, 9, 200)))
            .unwrap();

        assert_eq!((texture.width, texture.height), (128, 64));
        assert_relative_eq!(texture.uv.min_u, 0.0);
        assert_relative_eq!(texture.uv.min_v, 0.0);
        assert_relative_eq!(texture.uv.max_u, 100.0 / 128.0);
        assert_relative_eq!(texture.uv.max_v, 50.0 / 64.0);
        assert_eq!(device.texture_size(texture.id), Some((128, 64, PixelFormat::Rgba8)));
    }

    #[test]
    fn test_part_uv_uses_padded_dimensions() {
        let mut device = HeadlessDevice::new();
        let mut loader = loader();
        let source = PixelBuffer::solid(48, 48, Color::rgb(0, 0, 0));
        let bounds = PixelBounds::new(16, 0, 32, 16);

        let first = loader.load_part(&mut device, &source, bounds).unwrap();
        let second = loader.load_part(&mut device, &source, bounds).unwrap();

        assert_eq!(first.uv, second.uv);
        assert_relative_eq!(first.uv.min_u, 0.25);
        assert_relative_eq!(first.uv.max_u, 0.5);
        assert_relative_eq!(first.uv.max_v, 0.25);

        let outside = loader.load_part(&mut device, &source, PixelBounds::new(0, 0, 49, 1));
        assert!(matches!(outside, Err(TextureError::InvalidBounds { .. })));
    }

    #[test]
    fn test_empty_source_rejected() {
        let mut device = HeadlessDevice::new();
        let result = loader().load(&mut device, &PixelBuffer::new(0, 8));
        assert!(matches!(result, Err(TextureError::EmptySource { width: 0, height: 8 })));
        assert!(device.calls().is_empty());
    }

    /// Reports a size without owning any pixels
    struct Oversized;

    impl PixelSource for Oversized {
        fn width(&self) -> u32 {
            (1 << 30) + 1
        }

        fn height(&self) -> u32 {
            1
        }

        fn pixel(&self, _x: u32, _y: u32) -> [u8; 4] {
            [0; 4]
        }

        fn is_opaque(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_oversized_source_rejected_before_upload() {
        let mut device = HeadlessDevice::new();
        let mut loader = loader();

        let whole = loader.load(&mut device, &Oversized);
        assert!(matches!(whole, Err(TextureError::SizeExceeded { width, height: 1 }) if width == (1 << 30) + 1));

        let part = loader.load_part(&mut device, &Oversized, PixelBounds::new(0, 0, 4, 1));
        assert!(matches!(part, Err(TextureError::SizeExceeded { .. })));

        assert!(device.calls().is_empty());
        assert_eq!(loader.registered(), 0);
    }

    #[test]
    fn test_clean_releases_once() {
        let mut device = HeadlessDevice::new();
        let mut loader = loader();
        let source = PixelBuffer::solid(2, 2, Color::rgb(0, 0, 0));
        let a = loader.load(&mut device, &source).unwrap();
        let b = loader.load(&mut device, &source).unwrap();
        assert_eq!(loader.registered(), 2);

        loader.clean(&mut device);
        loader.clean(&mut device);

        let deleted: Vec<_> = device
            .calls()
            .iter()
            .filter_map(|call| match call {
                DeviceCall::DeleteTexture(id) => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(deleted, vec![a.id, b.id]);
        assert_eq!(loader.registered(), 0);
        assert_eq!(device.live_textures(), 0);
    }

    #[test]
    fn test_named_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let image = image::RgbaImage::from_pixel(3, 5, image::Rgba([255, 0, 0, 255]));
        image.save(dir.path().join("red.png")).unwrap();

        let mut device = HeadlessDevice::new();
        let mut loader = TextureLoader::new(Box::new(SearchPathLocator::new([dir.path()])));
        let texture = loader.load_named(&mut device, "red.png").unwrap();

        assert_eq!((texture.width, texture.height), (4, 8));
        assert_eq!(device.texture_size(texture.id), Some((4, 8, PixelFormat::Rgb8)));
    }

    #[test]
    fn test_named_failures_reach_sink() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();

        let reports = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = Rc::clone(&reports);
        let mut device = HeadlessDevice::new();
        let mut loader = TextureLoader::new(Box::new(SearchPathLocator::new([dir.path()])));
        loader.set_diagnostics(Box::new(move |message: &str| sink.borrow_mut().push(message.to_string())));

        assert!(loader.load_named(&mut device, "missing.png").is_none());
        assert!(loader.load_named(&mut device, "broken.png").is_none());
        assert!(loader
            .load_named_part(&mut device, "missing.png", PixelBounds::whole(1, 1))
            .is_none());

        let reports = reports.borrow();
        assert_eq!(reports.len(), 3);
        assert!(reports[0].contains("missing.png"));
        assert!(reports[1].contains("broken.png"));
        assert_eq!(loader.registered(), 0);

        assert!(matches!(loader.open("broken.png"), Err(TextureError::Image(_))));
        assert!(matches!(loader.open("missing.png"), Err(TextureError::NotFound(_))));
    }
}
