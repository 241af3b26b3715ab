//! # Event Dispatcher
//!
//! Drains queued [`InputEvent`]s one at a time. Each event updates
//! [`InputState`] and then runs hook, delivery and hook to completion before
//! the next event is looked at.

use super::{ButtonAction, InputEvent, InputState, KeyAction, WindowListener};
use crate::component::Component;
use crate::keycode::{KeyCode, KeyTranslator};

/// Factor applied to raw vertical scroll offsets
pub const SCROLL_SCALE: f32 = 0.04;

/// Routes platform events to the root component
pub struct EventDispatcher {
    state: InputState,
    translator: &'static KeyTranslator,
    inner_width: u32,
    inner_height: u32,
    dirty: bool,
    listener: Option<Box<dyn WindowListener>>,
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("state", &self.state)
            .field("inner_width", &self.inner_width)
            .field("inner_height", &self.inner_height)
            .field("dirty", &self.dirty)
            .field("listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl EventDispatcher {
    /// Dispatcher for a client area of `inner_width` x `inner_height` pixels
    pub fn new(inner_width: u32, inner_height: u32) -> Self {
        Self {
            state: InputState::new(),
            translator: KeyTranslator::global(),
            inner_width,
            inner_height,
            dirty: true,
            listener: None,
        }
    }

    /// Install or remove the listener
    pub fn set_listener(&mut self, listener: Option<Box<dyn WindowListener>>) {
        self.listener = listener;
    }

    /// The installed listener
    pub fn listener_mut(&mut self) -> Option<&mut (dyn WindowListener + 'static)> {
        self.listener.as_deref_mut()
    }

    /// Current input state
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Current client area size
    pub fn inner_size(&self) -> (u32, u32) {
        (self.inner_width, self.inner_height)
    }

    /// Track a new client area size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.inner_width = width;
        self.inner_height = height;
        self.dirty = true;
    }

    /// Reset per-frame state before events are polled
    pub fn begin_poll(&mut self) {
        self.state.begin_poll();
    }

    /// Whether anything changed since the last call, clearing the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Fully dispatch one event
    pub fn dispatch(&mut self, event: InputEvent, root: &mut dyn Component) {
        match event {
            InputEvent::Key { native, action } => {
                let codes = self.translator.translate(native);
                if codes.is_empty() {
                    log::trace!("Ignoring unmapped key {native}");
                }
                for code in codes {
                    match action {
                        KeyAction::Press | KeyAction::Repeat => self.key_pressed(code, root),
                        KeyAction::Release => self.key_released(code, root),
                    }
                }
                self.dirty = true;
            }
            InputEvent::Char(code_point) => {
                self.char_typed(code_point, root);
                self.dirty = true;
            }
            InputEvent::CursorMove { x, y } => self.cursor_moved(x, y),
            InputEvent::CursorLeave => {
                self.state.leave();
                self.dirty = true;
            }
            InputEvent::CursorEnter => {}
            InputEvent::MouseButton { button, action } => {
                self.mouse_button(button, action, root);
                self.dirty = true;
            }
            InputEvent::Scroll { dy, .. } => {
                self.scrolled(dy, root);
                self.dirty = true;
            }
            InputEvent::Resized { width, height } => {
                log::debug!("Client area resized to {width}x{height}");
                self.resize(width, height);
            }
            InputEvent::Moved { .. } | InputEvent::CloseRequested => {}
        }
    }

    /// Run the loop-start hook; `true` means skip this iteration
    pub fn pre_run_loop(&mut self) -> bool {
        self.listener.as_mut().is_some_and(|listener| listener.pre_run_loop())
    }

    /// Run the loop-end hook
    pub fn post_run_loop(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener.post_run_loop();
        }
    }

    fn key_pressed(&mut self, code: KeyCode, root: &mut dyn Component) {
        self.state.set_key(code, true);
        let state = &self.state;
        if self.listener.as_mut().is_some_and(|l| l.pre_key_pressed(code, state)) {
            return;
        }
        root.key_pressed(code);
        if let Some(listener) = self.listener.as_mut() {
            listener.post_key_pressed(code, state);
        }
    }

    fn key_released(&mut self, code: KeyCode, root: &mut dyn Component) {
        let state = &self.state;
        if !self.listener.as_mut().is_some_and(|l| l.pre_key_released(code, state)) {
            root.key_released(code);
            if let Some(listener) = self.listener.as_mut() {
                listener.post_key_released(code, state);
            }
        }
        self.state.set_key(code, false);
    }

    fn char_typed(&mut self, code_point: u32, root: &mut dyn Component) {
        let ch = match char::from_u32(code_point) {
            Some(ch) if code_point <= 0xFFFF => ch,
            _ => {
                log::warn!("Unsupported character ({code_point})");
                return;
            }
        };
        if self.listener.as_mut().is_some_and(|l| l.pre_char_typed(ch)) {
            return;
        }
        root.char_typed(ch);
        if let Some(listener) = self.listener.as_mut() {
            listener.post_char_typed(ch);
        }
    }

    fn cursor_moved(&mut self, x: f64, y: f64) {
        let (width, height) = (f64::from(self.inner_width), f64::from(self.inner_height));
        if x < 0.0 || y < 0.0 || x >= width || y >= height {
            self.state.leave();
        } else {
            self.state.move_cursor((x / width) as f32, 1.0 - (y / height) as f32);
        }
        self.dirty = true;
    }

    fn mouse_button(&mut self, button: i32, action: ButtonAction, root: &mut dyn Component) {
        let Some(button) = button.checked_add(1).and_then(|b| u8::try_from(b).ok()) else {
            log::warn!("Ignoring mouse button {button}");
            return;
        };
        match action {
            ButtonAction::Press => self.state.set_mouse(button, true),
            ButtonAction::Release => {
                self.state.set_mouse(button, false);
                let state = &self.state;
                let (x, y) = state.mouse_position();
                if self.listener.as_mut().is_some_and(|l| l.pre_click(x, y, button, state)) {
                    return;
                }
                root.click(x, y, button);
                if let Some(listener) = self.listener.as_mut() {
                    listener.post_click(x, y, button, state);
                }
            }
        }
    }

    fn scrolled(&mut self, offset: f64, root: &mut dyn Component) {
        let mut amount = offset as f32 * SCROLL_SCALE;
        if let Some(listener) = self.listener.as_mut() {
            amount = listener.pre_scroll(amount);
        }
        if amount == 0.0 {
            return;
        }
        root.scroll(amount);
        if let Some(listener) = self.listener.as_mut() {
            listener.post_scroll(amount);
        }
    }
}
