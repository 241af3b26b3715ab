//! Component contract

use crate::input::InputState;
use crate::keycode::KeyCode;
use crate::render::Renderer;

/// Node of the retained component tree
///
/// Every input method defaults to ignoring the event, so a component only
/// overrides what it handles. Containers forward to their children.
pub trait Component {
    /// A canonical key went down or repeated
    fn key_pressed(&mut self, _key: KeyCode) {}

    /// A canonical key went up
    fn key_released(&mut self, _key: KeyCode) {}

    /// A character was typed
    fn char_typed(&mut self, _ch: char) {}

    /// A mouse button was released at a normalized position
    ///
    /// Coordinates are `NaN` when the cursor is outside the window.
    /// Buttons are 1-indexed.
    fn click(&mut self, _x: f32, _y: f32, _button: u8) {}

    /// Vertical scroll, already scaled
    fn scroll(&mut self, _amount: f32) {}

    /// Per-frame update after input has been dispatched
    fn update(&mut self, _input: &InputState) {}

    /// Draw into the renderer's local unit space
    fn render(&mut self, renderer: &mut dyn Renderer);
}
