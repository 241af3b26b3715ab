//! # GUI Renderer
//!
//! [`GuiRenderer`] owns the device, the texture loader, the solid-fill cache
//! and the command queue. Drawing happens only inside a [`Frame`], which
//! brackets the device's pipeline state and flushes queued commands when it
//! is finished or dropped.
//!
//! Components receive `&mut dyn Renderer`. Asking for an area yields an
//! [`AreaRenderer`] whose local unit space maps onto the requested
//! rectangle; areas of areas compose their rectangles rather than nesting
//! wrappers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Color, GraphicsDevice, Rect, RenderCommand, RenderQueue};
use crate::texture::{PixelBounds, PixelBuffer, PixelSource, Texture, TextureError, TextureLoader};

/// Drawing contract seen by components
///
/// Every rectangle is in the renderer's local `[0, 1]` space.
pub trait Renderer {
    /// View of `rect` whose local unit space covers exactly that rectangle
    fn get_area(&mut self, rect: Rect) -> AreaRenderer<'_>;

    /// Stretch a texture over `rect`
    fn draw_texture(&mut self, texture: &Texture, rect: Rect);

    /// Fill `rect` with a solid color
    fn fill(&mut self, color: Color, rect: Rect);

    /// Clear the entire viewport, ignoring any area
    fn clear(&mut self, color: Color);
}

/// When submitted commands reach the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RenderMode {
    /// Execute each command on submission
    Immediate,
    /// Queue commands and flush them in order when the frame finishes
    #[default]
    Deferred,
}

/// Receives commands already resolved to absolute coordinates
trait RenderTarget {
    fn submit(&mut self, command: RenderCommand);
}

/// Sub-region view of a frame
pub struct AreaRenderer<'a> {
    target: &'a mut dyn RenderTarget,
    area: Rect,
}

impl AreaRenderer<'_> {
    /// Absolute rectangle this view maps its unit space onto
    pub fn area(&self) -> Rect {
        self.area
    }
}

impl std::fmt::Debug for AreaRenderer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AreaRenderer").field("area", &self.area).finish_non_exhaustive()
    }
}

impl Renderer for AreaRenderer<'_> {
    fn get_area(&mut self, rect: Rect) -> AreaRenderer<'_> {
        AreaRenderer {
            area: self.area.compose(rect),
            target: &mut *self.target,
        }
    }

    fn draw_texture(&mut self, texture: &Texture, rect: Rect) {
        self.target.submit(RenderCommand::DrawTexture {
            texture: *texture,
            rect: self.area.compose(rect),
        });
    }

    fn fill(&mut self, color: Color, rect: Rect) {
        self.target.submit(RenderCommand::Fill {
            color,
            rect: self.area.compose(rect),
        });
    }

    fn clear(&mut self, color: Color) {
        self.target.submit(RenderCommand::Clear { color });
    }
}

/// Renderer state that outlives frames
pub struct GuiRenderer<D: GraphicsDevice> {
    device: D,
    loader: TextureLoader,
    fill_cache: HashMap<Color, Texture>,
    queue: RenderQueue,
    mode: RenderMode,
}

impl<D: GraphicsDevice> std::fmt::Debug for GuiRenderer<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuiRenderer")
            .field("mode", &self.mode)
            .field("cached_fills", &self.fill_cache.len())
            .field("queued", &self.queue.len())
            .field("loader", &self.loader)
            .finish_non_exhaustive()
    }
}

impl<D: GraphicsDevice> GuiRenderer<D> {
    /// Create a renderer over `device`
    pub fn new(device: D, loader: TextureLoader, mode: RenderMode) -> Self {
        log::debug!("Creating GUI renderer in {mode:?} mode");
        Self {
            device,
            loader,
            fill_cache: HashMap::new(),
            queue: RenderQueue::with_capacity(256),
            mode,
        }
    }

    /// Current flavor
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Switch flavor; takes effect for the next frame
    pub fn set_mode(&mut self, mode: RenderMode) {
        self.mode = mode;
    }

    /// The underlying device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The underlying device, mutably
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// The texture loader
    pub fn loader_mut(&mut self) -> &mut TextureLoader {
        &mut self.loader
    }

    /// Upload a pixel source
    pub fn load_texture<S: PixelSource + ?Sized>(&mut self, source: &S) -> Result<Texture, TextureError> {
        self.loader.load(&mut self.device, source)
    }

    /// Upload a pixel source and expose only `bounds` of it
    pub fn load_texture_part<S: PixelSource + ?Sized>(
        &mut self,
        source: &S,
        bounds: PixelBounds,
    ) -> Result<Texture, TextureError> {
        self.loader.load_part(&mut self.device, source, bounds)
    }

    /// Load a named image resource, reporting failures to the loader's sink
    pub fn load_named(&mut self, name: &str) -> Option<Texture> {
        self.loader.load_named(&mut self.device, name)
    }

    /// Load part of a named image resource
    pub fn load_named_part(&mut self, name: &str, bounds: PixelBounds) -> Option<Texture> {
        self.loader.load_named_part(&mut self.device, name, bounds)
    }

    /// Cached 1x1 texture of exactly `color`
    pub fn fill_texture(&mut self, color: Color) -> Result<Texture, TextureError> {
        if let Some(texture) = self.fill_cache.get(&color) {
            return Ok(*texture);
        }
        let texture = self.loader.load(&mut self.device, &PixelBuffer::solid(1, 1, color))?;
        self.fill_cache.insert(color, texture);
        Ok(texture)
    }

    /// Number of cached fill colors
    pub fn cached_fills(&self) -> usize {
        self.fill_cache.len()
    }

    /// Give up the renderer, keeping the device
    pub fn into_device(self) -> D {
        self.device
    }

    /// Open a frame of `width` x `height` pixels
    pub fn begin_frame(&mut self, width: u32, height: u32) -> Frame<'_, D> {
        self.queue.clear();
        self.device.begin_frame(width, height);
        Frame { renderer: self }
    }

    /// Release every texture, the fill cache and device objects
    ///
    /// Calling it again only repeats the device cleanup, which is a no-op
    /// for released objects.
    pub fn clean(&mut self) {
        self.queue.clear();
        self.fill_cache.clear();
        self.loader.clean(&mut self.device);
        self.device.cleanup();
    }

    fn execute(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::DrawTexture { texture, rect } => {
                self.device.draw_quad(texture.id, rect, texture.uv);
            }
            RenderCommand::Fill { color, rect } => match self.fill_texture(color) {
                Ok(texture) => self.device.draw_quad(texture.id, rect, texture.uv),
                Err(e) => log::error!("Failed to create fill texture for {color:?}: {e}"),
            },
            RenderCommand::Clear { color } => self.device.clear(color),
        }
    }

    fn flush(&mut self) {
        let mut queue = std::mem::take(&mut self.queue);
        for command in queue.drain() {
            self.execute(command);
        }
        self.queue = queue;
    }
}

impl<D: GraphicsDevice> RenderTarget for GuiRenderer<D> {
    fn submit(&mut self, command: RenderCommand) {
        match command {
            RenderCommand::Clear { .. } => self.execute(command),
            RenderCommand::DrawTexture { rect, .. } | RenderCommand::Fill { rect, .. } => {
                if !rect.is_visible() {
                    log::trace!("Culled draw at {rect:?}");
                    return;
                }
                match self.mode {
                    RenderMode::Immediate => self.execute(command),
                    RenderMode::Deferred => self.queue.push(command),
                }
            }
        }
    }
}

/// One frame of drawing
///
/// Finishing or dropping the frame flushes queued commands and restores
/// device state.
pub struct Frame<'r, D: GraphicsDevice> {
    renderer: &'r mut GuiRenderer<D>,
}

impl<D: GraphicsDevice> Frame<'_, D> {
    /// Flush and close the frame
    pub fn finish(self) {}

    /// Commands waiting for the flush
    pub fn pending(&self) -> usize {
        self.renderer.queue.len()
    }

    /// The underlying device
    pub fn device(&self) -> &D {
        &self.renderer.device
    }
}

impl<D: GraphicsDevice> Renderer for Frame<'_, D> {
    fn get_area(&mut self, rect: Rect) -> AreaRenderer<'_> {
        AreaRenderer {
            target: &mut *self.renderer,
            area: Rect::UNIT.compose(rect),
        }
    }

    fn draw_texture(&mut self, texture: &Texture, rect: Rect) {
        self.get_area(Rect::UNIT).draw_texture(texture, rect);
    }

    fn fill(&mut self, color: Color, rect: Rect) {
        self.get_area(Rect::UNIT).fill(color, rect);
    }

    fn clear(&mut self, color: Color) {
        self.renderer.execute(RenderCommand::Clear { color });
    }
}

impl<D: GraphicsDevice> Drop for Frame<'_, D> {
    fn drop(&mut self) {
        self.renderer.flush();
        self.renderer.device.end_frame();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::render::{DeviceCall, HeadlessDevice};
    use crate::texture::{SearchPathLocator, UvRect};

    fn renderer(mode: RenderMode) -> GuiRenderer<HeadlessDevice> {
        let loader = TextureLoader::new(Box::new(SearchPathLocator::default()));
        GuiRenderer::new(HeadlessDevice::new(), loader, mode)
    }

    #[test]
    fn test_nested_areas_compose() {
        let mut renderer = renderer(RenderMode::Immediate);
        let texture = renderer
            .load_texture(&PixelBuffer::solid(2, 2, Color::WHITE))
            .unwrap();

        let mut frame = renderer.begin_frame(800, 600);
        {
            let mut right = frame.get_area(Rect::new(0.5, 0.0, 1.0, 1.0));
            let mut top = right.get_area(Rect::new(0.0, 0.5, 1.0, 1.0));
            assert_eq!(top.area(), Rect::new(0.5, 0.5, 1.0, 1.0));
            top.draw_texture(&texture, Rect::new(0.0, 0.0, 0.5, 0.5));
        }
        let draws = frame.device().draws();
        frame.finish();

        assert_eq!(draws.len(), 1);
        let (id, rect, uv) = draws[0];
        assert_eq!(id, texture.id);
        assert_eq!(uv, UvRect::FULL);
        assert_relative_eq!(rect.min_x, 0.5);
        assert_relative_eq!(rect.min_y, 0.5);
        assert_relative_eq!(rect.max_x, 0.75);
        assert_relative_eq!(rect.max_y, 0.75);
    }

    #[test]
    fn test_offscreen_rect_is_culled() {
        let mut renderer = renderer(RenderMode::Deferred);
        let mut frame = renderer.begin_frame(100, 100);
        frame.fill(Color::BLACK, Rect::new(1.5, 1.5, 2.0, 2.0));
        frame
            .get_area(Rect::new(0.5, 0.5, 1.0, 1.0))
            .fill(Color::BLACK, Rect::new(1.5, 1.5, 2.0, 2.0));
        assert_eq!(frame.pending(), 0);
        frame.finish();

        assert!(renderer.device().draws().is_empty());
        assert_eq!(renderer.cached_fills(), 0);
    }

    #[test]
    fn test_deferred_flushes_in_order_on_finish() {
        let mut renderer = renderer(RenderMode::Deferred);
        let red = renderer.fill_texture(Color::rgb(255, 0, 0)).unwrap();
        let blue = renderer.fill_texture(Color::rgb(0, 0, 255)).unwrap();
        renderer.device_mut().clear_calls();

        let mut frame = renderer.begin_frame(100, 100);
        frame.fill(Color::rgb(255, 0, 0), Rect::UNIT);
        frame.fill(Color::rgb(0, 0, 255), Rect::new(0.25, 0.25, 0.75, 0.75));
        assert_eq!(frame.pending(), 2);
        assert!(frame.device().draws().is_empty());
        frame.finish();

        let calls = renderer.device().calls().to_vec();
        assert_eq!(calls.first(), Some(&DeviceCall::BeginFrame { width: 100, height: 100 }));
        assert_eq!(calls.last(), Some(&DeviceCall::EndFrame));
        let order: Vec<_> = renderer.device().draws().iter().map(|draw| draw.0).collect();
        assert_eq!(order, vec![red.id, blue.id]);
    }

    #[test]
    fn test_immediate_executes_on_submit() {
        let mut renderer = renderer(RenderMode::Immediate);
        let mut frame = renderer.begin_frame(100, 100);
        frame.fill(Color::WHITE, Rect::UNIT);
        assert_eq!(frame.pending(), 0);
        assert_eq!(frame.device().draws().len(), 1);
    }

    #[test]
    fn test_clear_ignores_area_and_queue() {
        let mut renderer = renderer(RenderMode::Deferred);
        let mut frame = renderer.begin_frame(100, 100);
        frame.fill(Color::WHITE, Rect::UNIT);
        frame
            .get_area(Rect::new(0.1, 0.1, 0.2, 0.2))
            .clear(Color::BLACK);
        assert!(frame
            .device()
            .calls()
            .contains(&DeviceCall::Clear(Color::BLACK)));
        assert_eq!(frame.pending(), 1);
        drop(frame);

        let calls = renderer.device().calls();
        let clear = calls.iter().position(|c| *c == DeviceCall::Clear(Color::BLACK));
        let draw = calls.iter().position(|c| matches!(c, DeviceCall::DrawQuad { .. }));
        assert!(clear < draw);
    }

    #[test]
    fn test_fill_cache_reuses_texture() {
        let mut renderer = renderer(RenderMode::Immediate);
        let a = renderer.fill_texture(Color::rgba(10, 20, 30, 40)).unwrap();
        let b = renderer.fill_texture(Color::rgba(10, 20, 30, 40)).unwrap();
        let c = renderer.fill_texture(Color::rgba(10, 20, 30, 41)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a.id, c.id);
        assert_eq!(renderer.cached_fills(), 2);
        assert_eq!(renderer.device().live_textures(), 2);
    }

    #[test]
    fn test_clean_releases_everything() {
        let mut renderer = renderer(RenderMode::Deferred);
        renderer.fill_texture(Color::WHITE).unwrap();
        renderer.load_texture(&PixelBuffer::solid(3, 3, Color::BLACK)).unwrap();

        renderer.clean();
        assert_eq!(renderer.cached_fills(), 0);
        assert_eq!(renderer.device().live_textures(), 0);
        assert_eq!(renderer.device().calls().last(), Some(&DeviceCall::Cleanup));
    }
}
