//! Browser bindings
//!
//! The page owns the canvas, pointer events and the animation frame loop;
//! it forwards them here and draws from [`WebGame::snapshot_json`].

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::engine::{Engine, FixedCadence};
use crate::platform::storage::LocalStore;
use crate::sim::Rect;
use crate::tuning::Tuning;

/// Longest frame gap fed to the cadence (tab switches, debugger pauses)
const MAX_FRAME_SECS: f64 = 0.1;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        log::warn!("Failed to init logger: {}", e);
    }
    log::info!("Brick Blitz loaded");
}

/// One game bound to the page
#[wasm_bindgen]
pub struct WebGame {
    engine: Engine,
    cadence: FixedCadence,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let store = LocalStore;
        let tuning = Tuning::load(&store);
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            engine: Engine::new(Box::new(store), tuning, seed),
            cadence: FixedCadence::default(),
            last_time: None,
        }
    }

    pub fn start_game(&mut self) {
        self.last_time = None;
        self.engine.start_game();
    }

    /// Play area changed (layout or resize), in CSS pixels
    pub fn update_game_area(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.engine.update_game_area(Rect::new(x, y, width, height));
    }

    pub fn move_paddle(&mut self, x: f32, y: f32) {
        self.engine.move_paddle(Vec2::new(x, y));
    }

    /// requestAnimationFrame callback (`time` in ms)
    pub fn frame(&mut self, time: f64) {
        let dt = match self.last_time {
            Some(last) => ((time - last) / 1000.0).clamp(0.0, MAX_FRAME_SECS),
            None => 0.0,
        };
        self.last_time = Some(time);
        self.cadence.drive(&mut self.engine, dt as f32);
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn score(&self) -> f64 {
        self.engine.state().score as f64
    }

    pub fn high_score(&self) -> f64 {
        self.engine.state().high_score as f64
    }

    /// Render snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.snapshot()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Save the finished run; returns it as JSON
    pub fn record_session(&mut self) -> Result<String, JsValue> {
        let record = self.engine.record_session(js_sys::Date::now());
        serde_json::to_string(&record).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn sessions_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.engine.sessions()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn delete_session(&mut self, id: f64) -> bool {
        self.engine.delete_session(id as u64)
    }

    pub fn designs_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.engine.designs()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Add or replace a design given as JSON (id 0 allocates a new one)
    pub fn save_design(&mut self, json: &str) -> Result<(), JsValue> {
        let mut design: crate::persistence::Design =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        if design.id == 0 {
            design.id = self.engine.next_design_id();
        }
        self.engine.save_design(design);
        Ok(())
    }

    pub fn delete_design(&mut self, id: f64) -> bool {
        self.engine.delete_design(id as u64)
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
