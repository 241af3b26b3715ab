//! # GUI Configuration
//!
//! Top-level settings for a GUI window: window geometry, frame pacing,
//! renderer flavor, texture resource lookup and logging. Every section has
//! defaults so partial files load cleanly.

use serde::{Serialize, Deserialize};

use super::{Config, ConfigError};
use crate::render::RenderMode;

/// Largest frame rate accepted by [`FrameConfig`]
const MAX_TARGET_FPS: u32 = 1000;

/// Window creation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Requested outer width in pixels (ignored in fullscreen)
    pub width: u32,
    /// Requested outer height in pixels (ignored in fullscreen)
    pub height: u32,
    /// Whether the window has decorations
    pub border: bool,
    /// Open at the primary monitor's largest video mode
    pub fullscreen: bool,
    /// Whether the user may resize the window
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Retained GUI".to_string(),
            width: 800,
            height: 600,
            border: true,
            fullscreen: false,
            resizable: true,
        }
    }
}

/// Frame loop settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Target frames per second for the run loop
    pub target_fps: u32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self { target_fps: 60 }
    }
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Whether draw calls are queued until frame end or executed directly
    pub mode: RenderMode,
    /// Skip rendering frames that no input or resize marked dirty
    pub redraw_on_change_only: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Deferred,
            redraw_on_change_only: false,
        }
    }
}

/// Texture resource lookup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    /// Directories searched in order when a texture is requested by name
    pub resource_dirs: Vec<String>,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            resource_dirs: vec!["resources".to_string(), "resources/textures".to_string()],
        }
    }
}

/// Complete GUI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Frame loop settings
    pub frame: FrameConfig,
    /// Renderer settings
    pub render: RenderConfig,
    /// Texture lookup settings
    pub textures: TextureConfig,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            frame: FrameConfig::default(),
            render: RenderConfig::default(),
            textures: TextureConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl GuiConfig {
    /// Create a configuration with the given window title
    pub fn new(title: impl Into<String>) -> Self {
        Self::default().with_title(title)
    }

    /// Set the window title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Set the window size
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set the target frame rate
    #[must_use]
    pub const fn with_target_fps(mut self, fps: u32) -> Self {
        self.frame.target_fps = fps;
        self
    }

    /// Set the renderer flavor
    #[must_use]
    pub const fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render.mode = mode;
        self
    }

    /// Switch to borderless fullscreen
    #[must_use]
    pub const fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.window.fullscreen = fullscreen;
        self.window.border = !fullscreen;
        self
    }

    /// Add a texture search directory
    #[must_use]
    pub fn with_resource_dir(mut self, dir: impl Into<String>) -> Self {
        self.textures.resource_dirs.push(dir.into());
        self
    }
}

impl Config for GuiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.window.title.is_empty() {
            return Err(ConfigError::Invalid("Window title cannot be empty".to_string()));
        }
        if !self.window.fullscreen && (self.window.width == 0 || self.window.height == 0) {
            return Err(ConfigError::Invalid(format!(
                "Window size must be positive, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.frame.target_fps == 0 || self.frame.target_fps > MAX_TARGET_FPS {
            return Err(ConfigError::Invalid(format!(
                "Target FPS must be between 1 and {MAX_TARGET_FPS}, got {}",
                self.frame.target_fps
            )));
        }
        if self.textures.resource_dirs.is_empty() {
            return Err(ConfigError::Invalid("At least one resource directory is required".to_string()));
        }
        Ok(())
    }
}
