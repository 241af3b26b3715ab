//! Renderer core
//!
//! Components draw into normalized `[0, 1]` screen space through the
//! [`Renderer`] trait. [`AreaRenderer`] maps a sub-rectangle onto a full
//! local space, and [`GuiRenderer`] resolves the commands against a
//! [`GraphicsDevice`], either immediately or through a per-frame queue.

pub mod color;
pub mod command;
pub mod device;
pub mod geometry;
pub mod gl;
pub mod headless;
pub mod renderer;

pub use color::Color;
pub use command::{RenderCommand, RenderQueue};
pub use device::{DeviceError, GraphicsDevice, PixelFormat, TextureUpload};
pub use geometry::Rect;
pub use gl::GlDevice;
pub use headless::{DeviceCall, HeadlessDevice};
pub use renderer::{AreaRenderer, Frame, GuiRenderer, RenderMode, Renderer};
