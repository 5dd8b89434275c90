//! Browser bindings
//!
//! The page owns the canvas, buttons and slider; it forwards clicks and
//! frame times here and draws from the getters.

use wasm_bindgen::prelude::*;

use crate::session::{GameEvent, Session};
use crate::settings::Settings;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed (module re-instantiated)
        return;
    }
    log::info!("Directional Boring starting...");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct DrillGame {
    session: Session,
}

#[wasm_bindgen]
impl DrillGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> DrillGame {
        let seed = js_sys::Date::now() as u64;
        DrillGame {
            session: Session::new(seed, &Settings::default()),
        }
    }

    /// Run the simulation for one animation frame (`dt` in seconds)
    ///
    /// Returns the end-of-run status ("WIN"/"LOSE") when this frame finished the run.
    pub fn frame(&mut self, dt: f32) -> Option<String> {
        self.session
            .advance(dt)
            .into_iter()
            .find_map(|event| match event {
                GameEvent::Finished { status, .. } => Some(status.as_str().to_string()),
                _ => None,
            })
    }

    /// Start/pause/retry; returns the new button label
    pub fn press_start(&mut self) -> String {
        self.session.press_start();
        self.session.control_label().to_string()
    }

    /// Returns the new mode ("EASY"/"HARD")
    pub fn toggle_mode(&mut self) -> String {
        self.session.toggle_mode();
        self.session.state().mode.as_str().to_string()
    }

    pub fn toggle_bias(&mut self) {
        self.session.toggle_bias();
    }

    pub fn set_randomness(&mut self, randomness: f32) {
        self.session.set_randomness(randomness);
    }

    /// Seed of this session's RNG, for reproducing a run
    pub fn seed(&self) -> f64 {
        self.session.seed() as f64
    }

    pub fn control_label(&self) -> String {
        self.session.control_label().to_string()
    }

    pub fn status(&self) -> String {
        self.session.state().status.as_str().to_string()
    }

    pub fn mode(&self) -> String {
        self.session.state().mode.as_str().to_string()
    }

    pub fn x(&self) -> f32 {
        self.session.state().position.x
    }

    pub fn y(&self) -> f32 {
        self.session.state().position.y
    }

    pub fn bit_angle(&self) -> f32 {
        self.session.state().bit_angle()
    }

    pub fn pipe_length(&self) -> u32 {
        self.session.state().pipe_length() as u32
    }

    pub fn clearance(&self) -> f32 {
        self.session.clearance()
    }

    /// Path as flat `[x0, y0, x1, y1, ...]`
    pub fn path(&self) -> js_sys::Float32Array {
        let flat: Vec<f32> = self
            .session
            .state()
            .path
            .iter()
            .flat_map(|p| [p.x, p.y])
            .collect();
        js_sys::Float32Array::from(flat.as_slice())
    }

    /// Full render state as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        self.session
            .snapshot_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn scene_width(&self) -> u32 {
        self.session.scene().width()
    }

    pub fn scene_height(&self) -> u32 {
        self.session.scene().height()
    }

    /// Background RGBA bytes for `ImageData`
    pub fn scene_pixels(&self) -> Vec<u8> {
        self.session.scene().to_rgba_bytes()
    }
}

impl Default for DrillGame {
    fn default() -> Self {
        Self::new()
    }
}
