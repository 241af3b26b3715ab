//! Platform-neutral input events

/// Key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Went down
    Press,
    /// Held down and auto-repeated
    Repeat,
    /// Went up
    Release,
}

/// Mouse button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    /// Went down
    Press,
    /// Went up
    Release,
}

/// Event queued by a window backend, in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Native key transition, translated during dispatch
    Key {
        /// Native key identifier
        native: i32,
        /// Transition
        action: KeyAction,
    },
    /// Unicode code point typed
    Char(u32),
    /// Cursor moved, in window pixels from the top-left
    CursorMove {
        /// Horizontal position
        x: f64,
        /// Vertical position
        y: f64,
    },
    /// Cursor entered the client area
    CursorEnter,
    /// Cursor left the client area
    CursorLeave,
    /// Mouse button transition
    MouseButton {
        /// Platform button index, 0-based
        button: i32,
        /// Transition
        action: ButtonAction,
    },
    /// Scroll wheel
    Scroll {
        /// Horizontal offset
        dx: f64,
        /// Vertical offset
        dy: f64,
    },
    /// Client area resized
    Resized {
        /// New inner width in pixels
        width: u32,
        /// New inner height in pixels
        height: u32,
    },
    /// Window moved
    Moved {
        /// Client area left edge
        x: i32,
        /// Client area top edge
        y: i32,
    },
    /// User asked to close the window
    CloseRequested,
}
