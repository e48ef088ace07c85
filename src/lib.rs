mod color;
mod renderer;
mod star;
mod star_field;
mod utils;
mod webgl_helpers;

pub use star::{LineSegment, Star};
pub use star_field::{ConfigError, StarField, StarFieldConfig};

use renderer::Renderer;
use wasm_bindgen::prelude::*;
use web_sys::console;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

// Canvas-facing front end: owns the star field plus the WebGL renderer and
// exposes the once-per-frame update/render pair to the JS host. The host
// drives the loop (requestAnimationFrame and frame pacing live in JS).
#[wasm_bindgen]
pub struct WarpCanvas {
    screen_width: u32,
    screen_height: u32,
    star_field: StarField,
    renderer: Renderer,
}

#[wasm_bindgen]
impl WarpCanvas {
    // Rejects nonsense configuration (zero rates, inverted distance bounds)
    // before any simulation state exists; the message lands in the JS error
    pub fn new(
        canvas: &web_sys::HtmlCanvasElement,
        stars_per_second: u32,
        distance_per_second: f64,
        framerate: u32,
        min_distance: f64,
        max_distance: f64,
    ) -> Result<WarpCanvas, JsValue> {
        let config = StarFieldConfig {
            stars_per_second,
            distance_per_second,
            framerate,
            min_distance,
            max_distance,
        };
        let star_field = StarField::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let renderer = Renderer::new(canvas);

        Ok(WarpCanvas {
            screen_width: canvas.width(),
            screen_height: canvas.height(),
            star_field,
            renderer,
        })
    }

    pub fn update(&mut self) {
        let _timer = Timer::new("WarpCanvas::update()");
        self.star_field.update();
    }

    pub fn render(&mut self) {
        let _timer = Timer::new("WarpCanvas::render()");
        let segments = self
            .star_field
            .line_segments(self.screen_width, self.screen_height);
        self.renderer.clear_screen();
        self.renderer.render_stars(&segments);
    }
}
