//! # Retained GUI
//!
//! A retained-mode GUI core. Components render themselves into normalized
//! `[0,1]×[0,1]` screen space and receive input translated from GLFW.
//!
//! ## Features
//!
//! - **Area Rendering**: Nested components draw into sub-rectangles through composed transforms
//! - **Deferred Commands**: Draw calls are queued per frame and flushed in submission order
//! - **Input Dispatch**: Canonical key codes, cursor tracking and pre/post listener hooks
//! - **Texture Packing**: Transparent power-of-two padding and atlas part textures
//! - **Headless Testing**: Recording device and scripted window for tests without a display
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use retained_gui::prelude::*;
//!
//! struct Background;
//!
//! impl Component for Background {
//!     fn render(&mut self, renderer: &mut dyn Renderer) {
//!         renderer.clear(Color::rgb(20, 20, 30));
//!         let mut panel = renderer.get_area(Rect::new(0.1, 0.1, 0.9, 0.9));
//!         panel.fill(Color::rgb(200, 80, 40), Rect::UNIT);
//!     }
//! }
//!
//! fn main() -> Result<(), GuiError> {
//!     let config = GuiConfig::default();
//!     retained_gui::foundation::logging::init(&config.log_level);
//!     let app = GuiApp::open(&config, Box::new(Background))?;
//!     app.run(config.frame.target_fps)
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod keycode;
pub mod texture;
pub mod render;
pub mod input;
pub mod platform;

mod app;
mod component;

pub use app::{GuiApp, GuiError, StopHandle};
pub use component::Component;

/// Common imports for toolkit users
pub mod prelude {
    pub use crate::{
        GuiApp, GuiError, StopHandle, Component,
        config::{Config, GuiConfig, WindowConfig, FrameConfig, RenderConfig, TextureConfig},
        keycode::KeyCode,
        texture::{Texture, TextureLoader, PixelSource, PixelBuffer, PixelBounds, UvRect},
        render::{Renderer, AreaRenderer, GuiRenderer, RenderMode, Rect, Color},
        input::{InputState, InputEvent, WindowListener},
    };
}
