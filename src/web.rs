//! Browser entry point
//!
//! The page owns the WebGL context and the animation loop. It forwards key
//! events, calls `frame()` once per animation frame and uploads
//! `draw_buffer()` as an instance buffer.

use wasm_bindgen::prelude::*;

use crate::highscores::HighScores;
use crate::platform::InputState;
use crate::render::{DrawInstance, TextureHandle, Textures, draw_list};
use crate::sim::{GamePhase, GameState, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {err}").into());
    }
    log::info!("Subway Runner starting...");
}

fn js_error(err: crate::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One run plus its input latch and leaderboard
#[wasm_bindgen]
pub struct WebRunner {
    state: GameState,
    input: InputState,
    high_scores: HighScores,
    /// Whether the current run has been recorded on the leaderboard
    recorded: bool,
}

#[wasm_bindgen]
impl WebRunner {
    /// `loader(path) -> number` is called once per asset. `tuning_json` may be
    /// empty for the default balance table.
    #[wasm_bindgen(constructor)]
    pub fn new(
        seed: f64,
        loader: &js_sys::Function,
        tuning_json: Option<String>,
    ) -> Result<WebRunner, JsValue> {
        let tuning = match tuning_json.filter(|json| !json.trim().is_empty()) {
            Some(json) => Tuning::from_json(&json).map_err(js_error)?,
            None => Tuning::default(),
        };

        let textures = Textures::load(&mut |path: &str| {
            loader
                .call1(&JsValue::NULL, &JsValue::from_str(path))
                .ok()
                .and_then(|handle| handle.as_f64())
                .map(|handle| TextureHandle(handle as u32))
                .unwrap_or_else(|| {
                    log::warn!("Texture loader returned no handle for {path}");
                    TextureHandle::default()
                })
        });

        Ok(Self {
            state: GameState::with_tuning(seed as u64, tuning, textures),
            input: InputState::new(),
            high_scores: HighScores::load(),
            recorded: false,
        })
    }

    /// Returns whether the key is bound (the page should `preventDefault`)
    pub fn key_down(&mut self, code: &str) -> bool {
        self.input.key_down(code)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.input.key_up(code)
    }

    /// Run one simulation tick
    pub fn frame(&mut self) {
        let input = self.input.sample();
        tick(&mut self.state, &input);

        if !self.recorded && self.state.outcome().is_some() {
            self.recorded = true;
            let summary = self.state.summary();
            if let Some(rank) = self.high_scores.add_run(&summary, js_sys::Date::now()) {
                log::info!("New high score! Rank #{}", rank);
                self.high_scores.save();
            }
        }
    }

    /// Start a fresh run with the same tuning and textures
    pub fn restart(&mut self, seed: f64) {
        let tuning = self.state.tuning.clone();
        let textures = self.state.textures.clone();
        self.state = GameState::with_tuning(seed as u64, tuning, textures);
        self.recorded = false;
        log::info!("Game restarted with seed: {}", seed);
    }

    /// Flat instance buffer, `instance_floats()` values per instance
    pub fn draw_buffer(&self) -> Vec<f32> {
        let list = draw_list(&self.state);
        bytemuck::cast_slice(&list).to_vec()
    }

    pub fn instance_floats() -> usize {
        DrawInstance::FLOATS
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn distance(&self) -> f32 {
        self.state.distance
    }

    pub fn phase(&self) -> String {
        match self.state.phase {
            GamePhase::Ready => "ready".into(),
            GamePhase::Running => "running".into(),
            GamePhase::Paused => "paused".into(),
            GamePhase::Ended(outcome) => format!("{outcome:?}").to_lowercase(),
        }
    }

    pub fn idle_mode(&self) -> bool {
        self.input.idle_mode
    }

    /// Events from the latest tick as a JSON array
    pub fn events_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.events).map_err(|err| js_error(err.into()))
    }

    pub fn summary_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.summary()).map_err(|err| js_error(err.into()))
    }

    pub fn high_scores_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.high_scores).map_err(|err| js_error(err.into()))
    }
}
