//! Browser bridge
//!
//! Exposes the simulation to a JavaScript presentation layer. JS forwards
//! key events and animation-frame timestamps; it renders from the drained
//! events and the HUD snapshot. The high score lives in LocalStorage.
//!
//! The host should call `drain_events_json` once per frame. Undrained
//! position updates coalesce to the latest value, other events queue up.

use wasm_bindgen::prelude::*;

use crate::highscores::HighScoreStore;
use crate::persistence::LocalStorage;
use crate::platform::{EdgeDetector, FixedStep, Key};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, push_event, tick};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Spy's Return (web) starting...");
}

/// Game instance owned by the page
#[wasm_bindgen]
pub struct WebGame {
    state: GameState,
    clock: FixedStep,
    keys: EdgeDetector,
    high_scores: HighScoreStore<LocalStorage>,
    pending: Vec<GameEvent>,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load(&LocalStorage);
        let high_scores = HighScoreStore::open(LocalStorage);
        let seed = js_sys::Date::now() as u64;
        WebGame {
            state: GameState::new(settings, seed, high_scores.best()),
            clock: FixedStep::default(),
            keys: EdgeDetector::new(),
            high_scores,
            pending: Vec::new(),
            last_time: None,
        }
    }

    /// Forward a `keydown` (`KeyboardEvent.code`); returns whether the game uses the key
    pub fn key_down(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.keys.key_down(key);
                true
            }
            None => false,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.keys.key_up(key);
        }
    }

    /// Window lost focus: forget held keys
    pub fn blur(&mut self) {
        self.keys.clear();
    }

    /// Run fixed steps for an animation frame (`time` in milliseconds)
    pub fn frame(&mut self, time: f64) {
        let dt = match self.last_time {
            Some(last) => ((time - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time);

        let steps = self.clock.advance(dt);
        for _ in 0..steps {
            let input = self.keys.take_input();
            tick(&mut self.state, &input, self.clock.step);
            self.collect_events();
        }
    }

    /// Fraction of a step left in the accumulator, for interpolated rendering
    pub fn alpha(&self) -> f32 {
        self.clock.alpha()
    }

    /// Wipe the stored high score (double-click on the HUD)
    pub fn clear_high_score(&mut self) {
        self.state.clear_high_score();
        self.collect_events();
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events_json(&mut self) -> String {
        let events = std::mem::take(&mut self.pending);
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::warn!("Could not serialize events: {}", e);
            "[]".to_string()
        })
    }

    /// HUD snapshot as JSON
    pub fn hud_json(&self) -> String {
        serde_json::to_string(&self.state.hud()).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn player_x(&self) -> f32 {
        self.state.player.pos.x
    }

    pub fn player_y(&self) -> f32 {
        self.state.player.pos.y
    }
}

impl WebGame {
    fn collect_events(&mut self) {
        let events = self.state.drain_events();
        self.high_scores.observe_all(&events);
        for event in events {
            push_event(&mut self.pending, event);
        }
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
