//! Normalized rectangles

/// Axis-aligned rectangle in a parent's normalized space
///
/// Values outside `[0, 1]` are legal; they are culled at draw time, never
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub min_x: f32,
    /// Bottom edge
    pub min_y: f32,
    /// Right edge
    pub max_x: f32,
    /// Top edge
    pub max_y: f32,
}

impl Rect {
    /// The whole local space
    pub const UNIT: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a rectangle
    pub const fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Width in parent units
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Height in parent units
    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Map `local`, given in this rectangle's own unit space, into the
    /// space this rectangle lives in
    pub fn compose(&self, local: Self) -> Self {
        let (w, h) = (self.width(), self.height());
        Self {
            min_x: self.min_x + local.min_x * w,
            min_y: self.min_y + local.min_y * h,
            max_x: self.min_x + local.max_x * w,
            max_y: self.min_y + local.max_y * h,
        }
    }

    /// Whether any part can land on screen
    pub fn is_visible(&self) -> bool {
        self.min_x <= 1.0 && self.min_y <= 1.0 && self.max_x >= 0.0 && self.max_y >= 0.0
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::UNIT
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_compose_is_linear() {
        let outer = Rect::new(0.5, 0.5, 1.0, 1.0);
        let inner = outer.compose(Rect::new(0.5, 0.0, 1.0, 0.5));
        assert_relative_eq!(inner.min_x, 0.75);
        assert_relative_eq!(inner.min_y, 0.5);
        assert_relative_eq!(inner.max_x, 1.0);
        assert_relative_eq!(inner.max_y, 0.75);

        assert_eq!(Rect::UNIT.compose(outer), outer);
        assert_eq!(outer.compose(Rect::UNIT), outer);
    }

    #[test]
    fn test_visibility() {
        assert!(Rect::UNIT.is_visible());
        assert!(Rect::new(-0.5, -0.5, 0.0, 0.0).is_visible());
        assert!(Rect::new(1.0, 1.0, 2.0, 2.0).is_visible());
        assert!(!Rect::new(1.5, 1.5, 2.0, 2.0).is_visible());
        assert!(!Rect::new(-1.0, 0.0, -0.1, 1.0).is_visible());
    }
}
