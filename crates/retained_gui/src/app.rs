//! # Frame Driver
//!
//! [`GuiApp`] ties a window backend, a renderer and the root component
//! together and runs them at a fixed rate:
//!
//! 1. stop signal or close request ends the loop
//! 2. the listener's `pre_run_loop` may skip the iteration
//! 3. poll and dispatch events, then `update` the root
//! 4. render one frame and present it
//! 5. `post_run_loop`, then sleep out the period
//!
//! Everything runs on the thread that opened the window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::component::Component;
use crate::config::{Config, ConfigError, GuiConfig};
use crate::foundation::thread::ThreadAffinity;
use crate::foundation::time::{FramePacer, Timer};
use crate::input::{EventDispatcher, InputState, WindowListener};
use crate::keycode;
use crate::platform::{GlfwWindow, WindowBackend, WindowError};
use crate::render::{DeviceError, GlDevice, GraphicsDevice, GuiRenderer};
use crate::texture::{TextureError, TextureLoader};

/// Top-level errors
#[derive(Error, Debug)]
pub enum GuiError {
    /// Window creation or platform failure
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Graphics device failure
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Texture failure
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    /// Frame rate of zero
    #[error("Frame rate must be positive, got {0}")]
    InvalidFrameRate(u32),
}

/// Cloneable request to stop a running [`GuiApp`]
///
/// The flag is read at the top of each iteration, so a frame in progress
/// completes first.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    /// Ask the loop to stop
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Whether a stop was requested
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Window, renderer and component tree driven by the frame loop
pub struct GuiApp<W: WindowBackend = GlfwWindow, D: GraphicsDevice = GlDevice> {
    window: W,
    renderer: GuiRenderer<D>,
    dispatcher: EventDispatcher,
    root: Box<dyn Component>,
    affinity: ThreadAffinity,
    stop: StopHandle,
    timer: Timer,
    redraw_on_change_only: bool,
}

impl GuiApp<GlfwWindow, GlDevice> {
    /// Open a GLFW window with an OpenGL device
    ///
    /// Fails when the configuration is invalid, the window cannot be created
    /// or the quad shader does not compile.
    pub fn open(config: &GuiConfig, root: Box<dyn Component>) -> Result<Self, GuiError> {
        config.validate()?;
        keycode::init();

        let mut window = GlfwWindow::open(&config.window)?;
        let device = GlDevice::from_loader(|name| window.proc_address(name))?;
        Ok(Self::with_parts(window, device, config, root))
    }
}

impl<W: WindowBackend, D: GraphicsDevice> GuiApp<W, D> {
    /// Assemble an app from an already open window and device
    pub fn with_parts(window: W, device: D, config: &GuiConfig, root: Box<dyn Component>) -> Self {
        let metrics = window.metrics();
        let loader = TextureLoader::from_config(&config.textures);
        Self {
            window,
            renderer: GuiRenderer::new(device, loader, config.render.mode),
            dispatcher: EventDispatcher::new(metrics.inner_width, metrics.inner_height),
            root,
            affinity: ThreadAffinity::current(),
            stop: StopHandle::default(),
            timer: Timer::new(),
            redraw_on_change_only: config.render.redraw_on_change_only,
        }
    }

    /// Handle that stops the loop from any thread
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Install or remove the window listener
    pub fn set_listener(&mut self, listener: Option<Box<dyn WindowListener>>) {
        self.dispatcher.set_listener(listener);
    }

    /// Renderer, for loading textures before the loop starts
    pub fn renderer_mut(&mut self) -> &mut GuiRenderer<D> {
        &mut self.renderer
    }

    /// The window backend
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Current input state
    pub fn input(&self) -> &InputState {
        self.dispatcher.state()
    }

    /// Run at `fps` frames per second until stopped or closed, then tear down
    ///
    /// # Panics
    /// When called from a thread other than the one that created the app.
    pub fn run(self, fps: u32) -> Result<(), GuiError> {
        let (result, window, device) = self.run_to_teardown(fps);
        drop(device);
        drop(window);
        log::info!("GUI closed");
        result
    }

    fn run_to_teardown(mut self, fps: u32) -> (Result<(), GuiError>, W, D) {
        let result = self.drive(fps);
        let (window, device) = self.teardown();
        (result, window, device)
    }

    fn drive(&mut self, fps: u32) -> Result<(), GuiError> {
        self.affinity.ensure("GuiApp::run");
        let mut pacer = FramePacer::new(fps).ok_or(GuiError::InvalidFrameRate(fps))?;
        log::info!("Running at {fps} fps ({:?} per frame)", pacer.period());

        while !self.stop.is_stopped() && !self.window.should_close() {
            pacer.begin_frame();
            if !self.dispatcher.pre_run_loop() {
                self.update();
                self.render();
                self.dispatcher.post_run_loop();
            }
            pacer.sleep_remainder();
        }
        Ok(())
    }

    fn update(&mut self) {
        self.dispatcher.begin_poll();
        for event in self.window.poll_events() {
            self.dispatcher.dispatch(event, self.root.as_mut());
        }
        self.root.update(self.dispatcher.state());
        self.timer.update();
    }

    fn render(&mut self) {
        let dirty = self.dispatcher.take_dirty();
        if self.redraw_on_change_only && !dirty {
            return;
        }
        let (width, height) = self.dispatcher.inner_size();
        let mut frame = self.renderer.begin_frame(width, height);
        self.root.render(&mut frame);
        frame.finish();
        self.window.swap_buffers();
    }

    fn teardown(mut self) -> (W, D) {
        self.affinity.ensure("GuiApp::close");
        log::info!(
            "Closing after {} frames ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        self.renderer.clean();
        (self.window, self.renderer.into_device())
    }
}

impl<W: WindowBackend, D: GraphicsDevice> std::fmt::Debug for GuiApp<W, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuiApp")
            .field("renderer", &self.renderer)
            .field("dispatcher", &self.dispatcher)
            .field("redraw_on_change_only", &self.redraw_on_change_only)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::input::{InputEvent, KeyAction};
    use crate::keycode::KeyCode;
    use crate::platform::HeadlessWindow;
    use crate::render::{Color, DeviceCall, HeadlessDevice, Rect, Renderer};

    #[derive(Default)]
    struct Seen {
        pressed: Vec<KeyCode>,
        updates: usize,
        renders: usize,
        mouse_over: Vec<bool>,
    }

    struct Panel {
        seen: Rc<RefCell<Seen>>,
    }

    impl Component for Panel {
        fn key_pressed(&mut self, key: KeyCode) {
            self.seen.borrow_mut().pressed.push(key);
        }

        fn update(&mut self, input: &InputState) {
            let mut seen = self.seen.borrow_mut();
            seen.updates += 1;
            seen.mouse_over.push(input.is_mouse_over());
        }

        fn render(&mut self, renderer: &mut dyn Renderer) {
            self.seen.borrow_mut().renders += 1;
            renderer.clear(Color::BLACK);
            renderer
                .get_area(Rect::new(0.25, 0.25, 0.75, 0.75))
                .fill(Color::rgb(200, 100, 50), Rect::UNIT);
        }
    }

    fn app(window: HeadlessWindow, config: &GuiConfig) -> (GuiApp<HeadlessWindow, HeadlessDevice>, Rc<RefCell<Seen>>) {
        let seen = Rc::new(RefCell::new(Seen::default()));
        let root = Box::new(Panel { seen: Rc::clone(&seen) });
        (GuiApp::with_parts(window, HeadlessDevice::new(), config, root), seen)
    }

    #[test]
    fn test_loop_runs_until_close_and_tears_down() {
        let window = HeadlessWindow::new(200, 100)
            .with_batch(vec![
                InputEvent::CursorMove { x: 20.0, y: 20.0 },
                InputEvent::Key { native: glfw::Key::Kp1 as i32, action: KeyAction::Press },
            ])
            .with_batch(vec![InputEvent::CursorLeave])
            .close_when_drained();
        let (app, seen) = app(window, &GuiConfig::default());

        let (result, window, device) = app.run_to_teardown(1000);
        assert!(result.is_ok());

        let seen = seen.borrow();
        assert_eq!(seen.pressed, vec![KeyCode::Key1Numpad, KeyCode::Key1]);
        assert_eq!(seen.updates, 2);
        assert_eq!(seen.renders, 2);
        assert_eq!(seen.mouse_over, vec![true, false]);
        assert_eq!(window.swaps(), 2);

        assert_eq!(device.draws().len(), 2);
        assert_eq!(device.live_textures(), 0);
        assert_eq!(device.calls().last(), Some(&DeviceCall::Cleanup));
    }

    #[test]
    fn test_stop_before_run_skips_frames() {
        let (app, seen) = app(HeadlessWindow::new(10, 10), &GuiConfig::default());
        let stop = app.stop_handle();
        std::thread::spawn(move || stop.stop()).join().unwrap();

        let (result, window, device) = app.run_to_teardown(60);
        assert!(result.is_ok());
        assert_eq!(window.polls(), 0);
        assert_eq!(seen.borrow().renders, 0);
        assert_eq!(device.calls(), &[DeviceCall::Cleanup]);
    }

    #[test]
    fn test_pre_run_loop_skips_iteration() {
        struct SkipThrice {
            calls: usize,
            stop: StopHandle,
            post_calls: Rc<RefCell<usize>>,
        }

        impl WindowListener for SkipThrice {
            fn pre_run_loop(&mut self) -> bool {
                self.calls += 1;
                if self.calls == 3 {
                    self.stop.stop();
                }
                true
            }

            fn post_run_loop(&mut self) {
                *self.post_calls.borrow_mut() += 1;
            }
        }

        let (mut app, seen) = app(HeadlessWindow::new(10, 10), &GuiConfig::default());
        let post_calls = Rc::new(RefCell::new(0));
        let stop = app.stop_handle();
        app.set_listener(Some(Box::new(SkipThrice {
            calls: 0,
            stop,
            post_calls: Rc::clone(&post_calls),
        })));

        let (result, window, _) = app.run_to_teardown(1000);
        assert!(result.is_ok());
        assert_eq!(window.polls(), 0);
        assert_eq!(seen.borrow().updates, 0);
        assert_eq!(*post_calls.borrow(), 0);
    }

    #[test]
    fn test_redraw_on_change_only() {
        let mut config = GuiConfig::default();
        config.render.redraw_on_change_only = true;
        let window = HeadlessWindow::new(100, 100)
            .with_batch(vec![InputEvent::CursorMove { x: 1.0, y: 1.0 }])
            .with_batch(Vec::new())
            .with_batch(Vec::new())
            .close_when_drained();
        let (app, seen) = app(window, &config);

        let (_, window, _) = app.run_to_teardown(1000);
        assert_eq!(seen.borrow().updates, 3);
        assert_eq!(seen.borrow().renders, 1);
        assert_eq!(window.swaps(), 1);
    }

    #[test]
    fn test_zero_fps_rejected_but_cleaned() {
        let (mut app, _) = app(HeadlessWindow::new(10, 10), &GuiConfig::default());
        app.renderer_mut().fill_texture(Color::WHITE).unwrap();

        let (result, _, device) = app.run_to_teardown(0);
        assert!(matches!(result, Err(GuiError::InvalidFrameRate(0))));
        assert_eq!(device.live_textures(), 0);
    }
}
