//! Input handling
//!
//! The platform layer queues [`InputEvent`]s; the [`EventDispatcher`] drains
//! them one at a time, updates [`InputState`], runs the optional
//! [`WindowListener`] hooks and delivers to the root component.

pub mod dispatcher;
pub mod event;
pub mod listener;
pub mod state;

pub use dispatcher::{EventDispatcher, SCROLL_SCALE};
pub use event::{ButtonAction, InputEvent, KeyAction};
pub use listener::WindowListener;
pub use state::InputState;
