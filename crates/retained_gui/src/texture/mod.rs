//! Texture loading
//!
//! Turns pixel sources into device textures. Devices only accept power-of-two
//! sides, so other sizes are padded onto a larger canvas and the returned
//! [`Texture`] carries the UV rectangle of the source pixels.

pub mod diagnostics;
pub mod loader;
pub mod locator;
pub mod pixels;

pub use diagnostics::{DiagnosticSink, LogSink};
pub use loader::{TextureLoader, SUPPORTED_SIZES, is_supported_size, next_supported_size};
pub use locator::{ResourceLocator, SearchPathLocator};
pub use pixels::{PixelBuffer, PixelSource};

use crate::render::DeviceError;

slotmap::new_key_type! {
    /// Handle to a texture living on a graphics device
    pub struct TextureId;
}

/// Normalized texture coordinates of a texture's visible region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    /// Left edge
    pub min_u: f32,
    /// Top edge
    pub min_v: f32,
    /// Right edge
    pub max_u: f32,
    /// Bottom edge
    pub max_v: f32,
}

impl UvRect {
    /// The whole backing store
    pub const FULL: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a UV rectangle
    pub const fn new(min_u: f32, min_v: f32, max_u: f32, max_v: f32) -> Self {
        Self { min_u, min_v, max_u, max_v }
    }

    /// Components in shader order
    pub const fn to_array(self) -> [f32; 4] {
        [self.min_u, self.min_v, self.max_u, self.max_v]
    }
}

/// A loaded texture or a part of one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    /// Device handle of the backing store
    pub id: TextureId,
    /// Backing store width in pixels
    pub width: u32,
    /// Backing store height in pixels
    pub height: u32,
    /// Visible region of the backing store
    pub uv: UvRect,
}

impl Texture {
    /// Whether this texture covers its entire backing store
    pub fn is_whole(&self) -> bool {
        self.uv == UvRect::FULL
    }
}

/// Inclusive-exclusive pixel rectangle inside a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelBounds {
    /// Left column
    pub min_x: u32,
    /// Top row
    pub min_y: u32,
    /// One past the right column
    pub max_x: u32,
    /// One past the bottom row
    pub max_y: u32,
}

impl PixelBounds {
    /// Create pixel bounds
    pub const fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Bounds covering a whole `width` x `height` image
    pub const fn whole(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// Texture loading errors
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    /// Source has a zero dimension
    #[error("Texture source is empty ({width}x{height})")]
    EmptySource {
        /// Source width
        width: u32,
        /// Source height
        height: u32,
    },

    /// No supported power-of-two size fits the source
    #[error("Texture size {width}x{height} exceeds the largest supported size")]
    SizeExceeded {
        /// Source width
        width: u32,
        /// Source height
        height: u32,
    },

    /// Part bounds fall outside the source
    #[error("Part bounds {bounds:?} do not fit a {width}x{height} source")]
    InvalidBounds {
        /// Requested bounds
        bounds: PixelBounds,
        /// Source width
        width: u32,
        /// Source height
        height: u32,
    },

    /// No resource directory holds the named file
    #[error("Texture resource '{0}' not found")]
    NotFound(String),

    /// Image could not be read or decoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Device rejected the upload
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),
}
