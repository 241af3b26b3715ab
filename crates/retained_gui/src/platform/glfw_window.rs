//! GLFW window with an OpenGL 3.3 core context

use glfw::{Action, Context, WindowEvent};

use super::{Insets, WindowBackend, WindowError, WindowMetrics};
use crate::config::WindowConfig;
use crate::foundation::thread::ThreadAffinity;
use crate::input::{ButtonAction, InputEvent, KeyAction};

/// GLFW window wrapper; dropping it destroys the window and terminates GLFW
pub struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    glfw: glfw::Glfw,
    metrics: WindowMetrics,
    affinity: ThreadAffinity,
}

impl std::fmt::Debug for GlfwWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlfwWindow").field("metrics", &self.metrics).finish_non_exhaustive()
    }
}

impl GlfwWindow {
    /// Open a window as configured and make its context current
    ///
    /// A bordered window keeps the configured outer size; fullscreen uses the
    /// primary monitor's largest video mode.
    pub fn open(config: &WindowConfig) -> Result<Self, WindowError> {
        let affinity = ThreadAffinity::current();
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));
        glfw.window_hint(glfw::WindowHint::Decorated(config.border));

        let (mut window, events, outer_w, outer_h) = if config.fullscreen {
            glfw.with_primary_monitor(|glfw, monitor| {
                let monitor = monitor.ok_or(WindowError::NoMonitor)?;
                let mode = monitor
                    .get_video_modes()
                    .into_iter()
                    .max_by_key(|mode| u64::from(mode.width) * u64::from(mode.height))
                    .ok_or(WindowError::NoMonitor)?;
                log::info!("Opening fullscreen at {}x{}", mode.width, mode.height);
                let (window, events) = glfw
                    .create_window(mode.width, mode.height, &config.title, glfw::WindowMode::FullScreen(monitor))
                    .ok_or(WindowError::CreationFailed)?;
                Ok::<_, WindowError>((window, events, mode.width, mode.height))
            })?
        } else {
            let (window, events) = glfw
                .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
                .ok_or(WindowError::CreationFailed)?;
            (window, events, config.width, config.height)
        };

        let (left, top, right, bottom) = window.get_frame_size();
        let insets = Insets { left, top, right, bottom };
        let inner_width = (outer_w as i32 - left - right).max(1) as u32;
        let inner_height = (outer_h as i32 - top - bottom).max(1) as u32;
        window.set_size(inner_width as i32, inner_height as i32);

        let mut metrics = WindowMetrics {
            inner_width,
            inner_height,
            insets,
            ..WindowMetrics::default()
        };
        let (client_x, client_y) = window.get_pos();
        metrics.apply_move(client_x, client_y);
        log::info!(
            "Window '{}' open: inner {inner_width}x{inner_height} at ({}, {})",
            config.title,
            metrics.position_x,
            metrics.position_y
        );

        window.make_current();
        window.set_all_polling(true);

        Ok(Self {
            window,
            events,
            glfw,
            metrics,
            affinity,
        })
    }

    /// Resolve an OpenGL symbol from the current context
    pub fn proc_address(&mut self, name: &str) -> *const std::ffi::c_void {
        self.affinity.ensure("GlfwWindow::proc_address");
        self.window.get_proc_address(name) as *const _
    }

    fn translate(&mut self, event: WindowEvent) -> Option<InputEvent> {
        let event = match event {
            WindowEvent::Key(key, _, action, _) => InputEvent::Key {
                native: key as i32,
                action: match action {
                    Action::Press => KeyAction::Press,
                    Action::Repeat => KeyAction::Repeat,
                    Action::Release => KeyAction::Release,
                },
            },
            WindowEvent::Char(ch) => InputEvent::Char(ch as u32),
            WindowEvent::CursorPos(x, y) => InputEvent::CursorMove { x, y },
            WindowEvent::CursorEnter(true) => InputEvent::CursorEnter,
            WindowEvent::CursorEnter(false) => InputEvent::CursorLeave,
            WindowEvent::MouseButton(button, action, _) => InputEvent::MouseButton {
                button: button as i32,
                action: match action {
                    Action::Press => ButtonAction::Press,
                    Action::Release => ButtonAction::Release,
                    Action::Repeat => {
                        log::warn!("Unknown mouse button action {action:?}");
                        return None;
                    }
                },
            },
            WindowEvent::Scroll(dx, dy) => InputEvent::Scroll { dx, dy },
            WindowEvent::Size(width, height) => {
                let (width, height) = (width.max(0) as u32, height.max(0) as u32);
                self.metrics.apply_resize(width, height);
                InputEvent::Resized { width, height }
            }
            WindowEvent::Pos(x, y) => {
                self.metrics.apply_move(x, y);
                InputEvent::Moved { x, y }
            }
            WindowEvent::Close => InputEvent::CloseRequested,
            _ => return None,
        };
        Some(event)
    }
}

impl WindowBackend for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.affinity.ensure("GlfwWindow::poll_events");
        self.glfw.poll_events();
        let native: Vec<_> = glfw::flush_messages(&self.events).map(|(_, event)| event).collect();
        native.into_iter().filter_map(|event| self.translate(event)).collect()
    }

    fn metrics(&self) -> WindowMetrics {
        self.metrics
    }

    fn swap_buffers(&mut self) {
        self.affinity.ensure("GlfwWindow::swap_buffers");
        self.window.swap_buffers();
    }
}

impl Drop for GlfwWindow {
    fn drop(&mut self) {
        log::info!("Destroying window");
    }
}
