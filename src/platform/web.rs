//! Browser entry points
//!
//! The page owns rendering and the `requestAnimationFrame` loop. It forwards
//! key edges and frame timestamps here and reads back the scoreboard, the
//! entity snapshot and the event queue as JSON.

use wasm_bindgen::prelude::*;

use super::keys::{is_demo_toggle, key_event};
use crate::settings::{Difficulty, Settings};
use crate::sim::{GameState, apply_input, autopilot, tick};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Paan Rider starting...");
}

/// One game session bound to the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    demo: bool,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a session from an optional difficulty name and JSON overrides
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: Option<String>, overrides: Option<String>) -> Result<WebGame, JsValue> {
        let difficulty = match difficulty.as_deref() {
            Some(name) => Difficulty::from_str(name).unwrap_or_else(|| {
                log::warn!("Unknown difficulty {:?}, using Normal", name);
                Difficulty::Normal
            }),
            None => Difficulty::Normal,
        };

        let base = Settings::from_preset(difficulty);
        let settings = match overrides {
            Some(json) => base.with_overrides(&json).map_err(|e| {
                log::warn!("Rejected settings: {}", e);
                JsValue::from_str(&e.to_string())
            })?,
            None => base,
        };

        let seed = js_sys::Date::now() as u64;
        Ok(WebGame {
            state: GameState::new(settings, seed),
            demo: false,
        })
    }

    pub fn key_down(&mut self, key: &str, now: f64) {
        if is_demo_toggle(key) {
            self.demo = !self.demo;
            log::info!("Demo mode: {}", self.demo);
            return;
        }
        if let Some(event) = key_event(key, true) {
            apply_input(&mut self.state, event, now);
        }
    }

    pub fn key_up(&mut self, key: &str, now: f64) {
        if let Some(event) = key_event(key, false) {
            apply_input(&mut self.state, event, now);
        }
    }

    /// Run one tick; call once per animation frame
    pub fn frame(&mut self, now: f64) {
        if self.demo {
            for event in autopilot(&self.state) {
                apply_input(&mut self.state, event, now);
            }
        }
        tick(&mut self.state, now);
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn demo(&self) -> bool {
        self.demo
    }

    /// Scoreboard text line
    pub fn scoreboard_text(&self) -> String {
        self.state.scoreboard().to_string()
    }

    pub fn scoreboard_json(&self) -> String {
        serde_json::to_string(&self.state.scoreboard()).unwrap_or_default()
    }

    /// Full entity snapshot for the renderer
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.state).unwrap_or_default()
    }

    /// Drain pending events
    pub fn events_json(&mut self) -> String {
        serde_json::to_string(&self.state.take_events()).unwrap_or_default()
    }
}
