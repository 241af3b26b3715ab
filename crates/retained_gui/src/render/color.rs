//! RGBA colors

/// 8-bit RGBA color, compared and hashed exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, u8::MAX)
    }

    /// Color with alpha
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether alpha is at maximum
    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    /// Channels as `[0, 1]` floats
    pub fn to_f32(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| f32::from(c) / 255.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_f32() {
        assert_eq!(Color::WHITE.to_f32(), [1.0; 4]);
        assert_eq!(Color::TRANSPARENT.to_f32(), [0.0; 4]);
        assert!(Color::rgb(1, 2, 3).is_opaque());
        assert!(!Color::rgba(1, 2, 3, 4).is_opaque());
    }
}
