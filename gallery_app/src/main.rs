//! Gallery demo application
//!
//! Opens a window and shows nested areas, solid fills and a padded
//! checkerboard texture, plus `gallery.png` when a resource directory has one.
//! Arrow keys move the selection, the wheel scrolls the
//! swatch column and Escape quits.

use std::cell::Cell;
use std::rc::Rc;

use retained_gui::foundation::logging;
use retained_gui::prelude::*;

const CONFIG_PATH: &str = "gallery.toml";

const SWATCHES: [Color; 6] = [
    Color::rgb(231, 76, 60),
    Color::rgb(230, 126, 34),
    Color::rgb(241, 196, 15),
    Color::rgb(46, 204, 113),
    Color::rgb(52, 152, 219),
    Color::rgb(155, 89, 182),
];

struct Gallery {
    checker: Rc<Cell<Option<Texture>>>,
    picture: Rc<Cell<Option<Texture>>>,
    selected: usize,
    scroll: f32,
    hover: Option<(f32, f32)>,
}

impl Gallery {
    fn render_swatches(&self, renderer: &mut dyn Renderer) {
        let count = SWATCHES.len() as f32;
        for (index, color) in SWATCHES.iter().enumerate() {
            let top = 1.0 - index as f32 / count + self.scroll;
            let slot = Rect::new(0.0, top - 1.0 / count, 1.0, top);
            let mut swatch = renderer.get_area(slot);
            if index == self.selected {
                swatch.fill(Color::WHITE, Rect::UNIT);
            }
            swatch.fill(*color, Rect::new(0.05, 0.1, 0.95, 0.9));
        }
    }
}

impl Component for Gallery {
    fn key_pressed(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(SWATCHES.len() - 1),
            _ => {}
        }
    }

    fn click(&mut self, x: f32, y: f32, button: u8) {
        log::info!("Gallery clicked at ({x:.3}, {y:.3}) with button {button}");
    }

    fn scroll(&mut self, amount: f32) {
        self.scroll = (self.scroll + amount).clamp(0.0, 1.0);
    }

    fn update(&mut self, input: &InputState) {
        self.hover = input.is_mouse_over().then(|| input.mouse_position());
    }

    fn render(&mut self, renderer: &mut dyn Renderer) {
        renderer.clear(Color::rgb(24, 26, 32));

        self.render_swatches(&mut renderer.get_area(Rect::new(0.02, 0.02, 0.3, 0.98)));

        let mut stage = renderer.get_area(Rect::new(0.34, 0.02, 0.98, 0.98));
        stage.fill(Color::rgb(44, 48, 58), Rect::UNIT);
        let mut inner = stage.get_area(Rect::new(0.1, 0.1, 0.9, 0.9));
        inner.fill(SWATCHES[self.selected], Rect::UNIT);
        if let Some(checker) = self.checker.get() {
            inner.draw_texture(&checker, Rect::new(0.25, 0.25, 0.75, 0.75));
        }
        if let Some(picture) = self.picture.get() {
            stage.draw_texture(&picture, Rect::new(0.7, 0.7, 0.98, 0.98));
        }

        if let Some((x, y)) = self.hover {
            renderer.fill(Color::rgba(255, 255, 255, 96), Rect::new(x - 0.01, y - 0.01, x + 0.01, y + 0.01));
        }
    }
}

struct GalleryListener {
    stop: StopHandle,
}

impl WindowListener for GalleryListener {
    fn pre_key_pressed(&mut self, key: KeyCode, _input: &InputState) -> bool {
        if key == KeyCode::Escape {
            log::info!("Escape pressed, stopping");
            self.stop.stop();
            return true;
        }
        false
    }

    fn pre_scroll(&mut self, amount: f32) -> f32 {
        amount * 2.0
    }

    fn post_click(&mut self, _x: f32, _y: f32, button: u8, input: &InputState) {
        log::debug!("Click with button {button} delivered, cursor inside: {}", input.is_mouse_over());
    }
}

fn checkerboard() -> PixelBuffer {
    const SIZE: u32 = 24;
    const CELL: u32 = 4;
    let mut buffer = PixelBuffer::new(SIZE, SIZE);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let light = (x / CELL + y / CELL) % 2 == 0;
            let rgba = if light { [236, 240, 241, 255] } else { [20, 20, 20, 160] };
            buffer.put(x, y, rgba);
        }
    }
    buffer
}

fn run() -> Result<(), GuiError> {
    let config = GuiConfig::load_or_default(CONFIG_PATH)?;
    logging::init(&config.log_level);
    log::info!("Starting gallery demo");

    let checker = Rc::new(Cell::new(None));
    let picture = Rc::new(Cell::new(None));
    let gallery = Gallery {
        checker: Rc::clone(&checker),
        picture: Rc::clone(&picture),
        selected: 0,
        scroll: 0.0,
        hover: None,
    };

    let mut app = GuiApp::open(&config, Box::new(gallery))?;
    let texture = app.renderer_mut().load_texture(&checkerboard())?;
    log::debug!("Checkerboard padded to {}x{} with UV {:?}", texture.width, texture.height, texture.uv);
    checker.set(Some(texture));

    match app.renderer_mut().load_named("gallery.png") {
        Some(texture) => picture.set(Some(texture)),
        None => log::info!("No gallery.png resource, showing the checkerboard only"),
    }

    let stop = app.stop_handle();
    app.set_listener(Some(Box::new(GalleryListener { stop })));
    app.run(config.frame.target_fps)
}

fn main() {
    if let Err(e) = run() {
        log::error!("Gallery failed: {e}");
        eprintln!("Gallery failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use retained_gui::render::HeadlessDevice;
    use retained_gui::texture::SearchPathLocator;

    use super::*;

    fn gallery(picture: Option<Texture>) -> Gallery {
        Gallery {
            checker: Rc::new(Cell::new(None)),
            picture: Rc::new(Cell::new(picture)),
            selected: 0,
            scroll: 0.0,
            hover: None,
        }
    }

    #[test]
    fn test_loaded_picture_is_drawn() {
        let loader = TextureLoader::new(Box::new(SearchPathLocator::default()));
        let mut renderer = GuiRenderer::new(HeadlessDevice::new(), loader, RenderMode::Immediate);
        let picture = renderer.load_texture(&PixelBuffer::new(8, 8)).unwrap();

        let mut frame = renderer.begin_frame(960, 640);
        gallery(Some(picture)).render(&mut frame);
        let drawn: Vec<_> = frame.device().draws().into_iter().map(|(id, _, _)| id).collect();
        frame.finish();
        assert!(drawn.contains(&picture.id));

        renderer.device_mut().clear_calls();
        let mut frame = renderer.begin_frame(960, 640);
        gallery(None).render(&mut frame);
        let drawn: Vec<_> = frame.device().draws().into_iter().map(|(id, _, _)| id).collect();
        frame.finish();
        assert!(!drawn.contains(&picture.id));
    }
}
