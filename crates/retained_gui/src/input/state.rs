//! # Input State
//!
//! Snapshot of held keys, held mouse buttons and the cursor, owned by the
//! dispatcher and lent to components during `update`.

use crate::keycode::KeyCode;

/// Largest 1-based mouse button index tracked
pub const MAX_MOUSE_BUTTON: u8 = 15;

/// Current keyboard and mouse state
///
/// Cursor coordinates are normalized with `y` pointing up and are `NaN`
/// whenever the cursor is outside the client area or has not been seen yet.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    keys: u128,
    buttons: u16,
    mouse_x: f32,
    mouse_y: f32,
    previous_x: f32,
    previous_y: f32,
    mouse_dx: f32,
    mouse_dy: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            keys: 0,
            buttons: 0,
            mouse_x: f32::NAN,
            mouse_y: f32::NAN,
            previous_x: f32::NAN,
            previous_y: f32::NAN,
            mouse_dx: 0.0,
            mouse_dy: 0.0,
        }
    }
}

impl InputState {
    /// Nothing held, cursor untracked
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` is held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys & (1_u128 << key.index()) != 0
    }

    /// Whether 1-based mouse `button` is held
    pub fn is_mouse_down(&self, button: u8) -> bool {
        button <= MAX_MOUSE_BUTTON && self.buttons & (1_u16 << button) != 0
    }

    /// Normalized cursor position
    pub fn mouse_position(&self) -> (f32, f32) {
        (self.mouse_x, self.mouse_y)
    }

    /// Cursor position before the latest in-window move
    pub fn previous_mouse_position(&self) -> (f32, f32) {
        (self.previous_x, self.previous_y)
    }

    /// Cursor movement accumulated since the start of this frame's poll
    pub fn mouse_delta(&self) -> (f32, f32) {
        (self.mouse_dx, self.mouse_dy)
    }

    /// Whether the cursor is inside the client area
    pub fn is_mouse_over(&self) -> bool {
        !self.mouse_x.is_nan() && !self.mouse_y.is_nan()
    }

    /// Reset per-frame movement; called once before events are polled
    pub fn begin_poll(&mut self) {
        self.mouse_dx = 0.0;
        self.mouse_dy = 0.0;
    }

    pub(crate) fn set_key(&mut self, key: KeyCode, down: bool) {
        let bit = 1_u128 << key.index();
        if down {
            self.keys |= bit;
        } else {
            self.keys &= !bit;
        }
    }

    pub(crate) fn set_mouse(&mut self, button: u8, down: bool) {
        if button > MAX_MOUSE_BUTTON {
            log::trace!("Ignoring mouse button {button}");
            return;
        }
        let bit = 1_u16 << button;
        if down {
            self.buttons |= bit;
        } else {
            self.buttons &= !bit;
        }
    }

    /// Move to a normalized in-window position
    pub(crate) fn move_cursor(&mut self, x: f32, y: f32) {
        if self.is_mouse_over() {
            self.mouse_dx += x - self.mouse_x;
            self.mouse_dy += y - self.mouse_y;
        }
        self.previous_x = self.mouse_x;
        self.previous_y = self.mouse_y;
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Mark the cursor as outside the client area
    pub(crate) fn leave(&mut self) {
        self.mouse_x = f32::NAN;
        self.mouse_y = f32::NAN;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_key_bits() {
        let mut state = InputState::new();
        state.set_key(KeyCode::PageDown, true);
        state.set_key(KeyCode::A, true);
        assert!(state.is_key_down(KeyCode::PageDown));
        assert!(state.is_key_down(KeyCode::A));
        assert!(!state.is_key_down(KeyCode::B));

        state.set_key(KeyCode::A, false);
        assert!(!state.is_key_down(KeyCode::A));
        assert!(state.is_key_down(KeyCode::PageDown));
    }

    #[test]
    fn test_mouse_bits() {
        let mut state = InputState::new();
        state.set_mouse(1, true);
        state.set_mouse(40, true);
        assert!(state.is_mouse_down(1));
        assert!(!state.is_mouse_down(2));
        assert!(!state.is_mouse_down(40));
        state.set_mouse(1, false);
        assert!(!state.is_mouse_down(1));
    }

    #[test]
    fn test_delta_accumulates_until_poll() {
        let mut state = InputState::new();
        assert!(!state.is_mouse_over());

        state.move_cursor(0.5, 0.5);
        assert_eq!(state.mouse_delta(), (0.0, 0.0));

        state.move_cursor(0.6, 0.4);
        state.move_cursor(0.7, 0.45);
        let (dx, dy) = state.mouse_delta();
        assert_relative_eq!(dx, 0.2, epsilon = 1e-6);
        assert_relative_eq!(dy, -0.05, epsilon = 1e-6);
        assert_eq!(state.previous_mouse_position(), (0.6, 0.4));

        state.begin_poll();
        assert_eq!(state.mouse_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_leave_keeps_delta() {
        let mut state = InputState::new();
        state.move_cursor(0.1, 0.1);
        state.move_cursor(0.2, 0.1);
        state.leave();

        assert!(!state.is_mouse_over());
        assert!(state.mouse_position().0.is_nan());
        assert_relative_eq!(state.mouse_delta().0, 0.1, epsilon = 1e-6);

        state.move_cursor(0.9, 0.9);
        assert_relative_eq!(state.mouse_delta().0, 0.1, epsilon = 1e-6);
    }
}
