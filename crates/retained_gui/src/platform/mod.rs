//! Window backends
//!
//! A backend owns the native window, turns its callbacks into queued
//! [`InputEvent`]s and presents frames. [`GlfwWindow`] is the real thing;
//! [`HeadlessWindow`] replays scripted event batches.

pub mod glfw_window;
pub mod headless;

pub use glfw_window::GlfwWindow;
pub use headless::HeadlessWindow;

use crate::input::InputEvent;

/// Position reported by some platforms while the window is iconified
pub const ICONIFIED_POSITION: i32 = -32000;

/// Window management errors
#[derive(thiserror::Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The native window could not be created
    #[error("Window creation failed")]
    CreationFailed,

    /// Fullscreen was requested without a usable monitor
    #[error("No primary monitor with a video mode is available")]
    NoMonitor,
}

/// Width of the window decorations on each side, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    /// Left border
    pub left: i32,
    /// Title bar and top border
    pub top: i32,
    /// Right border
    pub right: i32,
    /// Bottom border
    pub bottom: i32,
}

/// Geometry of an open window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowMetrics {
    /// Client area width in pixels
    pub inner_width: u32,
    /// Client area height in pixels
    pub inner_height: u32,
    /// Decoration sizes
    pub insets: Insets,
    /// Outer left edge on screen
    pub position_x: i32,
    /// Outer top edge on screen
    pub position_y: i32,
}

impl WindowMetrics {
    /// Outer size including decorations
    pub fn outer_size(&self) -> (i32, i32) {
        (
            self.inner_width as i32 + self.insets.left + self.insets.right,
            self.inner_height as i32 + self.insets.top + self.insets.bottom,
        )
    }

    /// Track a client area move, ignoring iconified placeholders
    pub fn apply_move(&mut self, client_x: i32, client_y: i32) {
        if client_x == ICONIFIED_POSITION || client_y == ICONIFIED_POSITION {
            return;
        }
        self.position_x = client_x - self.insets.left;
        self.position_y = client_y - self.insets.top;
    }

    /// Track a client area resize
    pub fn apply_resize(&mut self, width: u32, height: u32) {
        self.inner_width = width;
        self.inner_height = height;
    }
}

/// Native window the frame driver runs against
pub trait WindowBackend {
    /// Whether the user or the application asked to close
    fn should_close(&self) -> bool;

    /// Request or cancel closing
    fn set_should_close(&mut self, should_close: bool);

    /// Pump the platform queue and return new events in arrival order
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Current geometry
    fn metrics(&self) -> WindowMetrics;

    /// Present the rendered frame
    fn swap_buffers(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iconified_move_ignored() {
        let mut metrics = WindowMetrics {
            inner_width: 640,
            inner_height: 480,
            insets: Insets { left: 8, top: 30, right: 8, bottom: 8 },
            ..WindowMetrics::default()
        };

        metrics.apply_move(108, 130);
        assert_eq!((metrics.position_x, metrics.position_y), (100, 100));

        metrics.apply_move(ICONIFIED_POSITION, ICONIFIED_POSITION);
        assert_eq!((metrics.position_x, metrics.position_y), (100, 100));

        assert_eq!(metrics.outer_size(), (656, 518));
    }
}
