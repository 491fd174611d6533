//! Browser bindings
//!
//! The page owns the canvas, buttons and requestAnimationFrame loop. It calls
//! into `WebGame` for every input and frame, then draws from the JSON views.

use wasm_bindgen::prelude::*;

use crate::audio::AudioManager;
use crate::driver::{Collaborator, Driver, PushedClock};
use crate::settings::Settings;
use crate::sim::{StepEvent, autopilot, session};
use crate::ui::{HudView, SceneView};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    log::info!("Rope Jump starting...");
}

/// Game instance holding all state
#[wasm_bindgen]
pub struct WebGame {
    driver: Driver<PushedClock>,
    audio: AudioManager,
    settings: Settings,
    /// Attract mode: the autopilot starts a run and plays it
    idle_mode: bool,
    last_event: StepEvent,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game for a viewport in CSS pixels
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> WebGame {
        let settings = Settings::load();
        let mut state = session::initialize(width, height);
        if state.mode != settings.start_mode {
            session::set_mode(&mut state, settings.start_mode);
        }

        WebGame {
            driver: Driver::new(state, PushedClock::default()),
            audio: AudioManager::from_settings(&settings),
            settings,
            idle_mode: false,
            last_event: StepEvent::None,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        session::on_resize(&mut self.driver.state, width, height);
    }

    /// Advance with a requestAnimationFrame timestamp (milliseconds).
    /// Returns a short event name for the page to flash on.
    pub fn frame(&mut self, timestamp_ms: f64) -> String {
        if self.idle_mode {
            autopilot::drive(&mut self.driver.state);
        }

        self.driver.source_mut().push(timestamp_ms / 1000.0);
        let mut collaborators: [&mut dyn Collaborator; 1] = [&mut self.audio];
        let event = self.driver.frame(&mut collaborators);
        self.last_event = event;

        match event {
            StepEvent::None => "none",
            StepEvent::Cleared { .. } => "cleared",
            StepEvent::Hit { .. } => "hit",
            StepEvent::GameOver => "gameOver",
        }
        .to_string()
    }

    pub fn jump(&mut self) {
        session::request_jump(&mut self.driver.state);
    }

    pub fn start(&mut self) {
        session::start(&mut self.driver.state);
    }

    pub fn pause_toggle(&mut self) {
        session::pause_toggle(&mut self.driver.state);
    }

    pub fn reset(&mut self) {
        session::reset(&mut self.driver.state);
    }

    pub fn toggle_mode(&mut self) {
        session::toggle_mode(&mut self.driver.state);
        self.settings.start_mode = self.driver.state.mode;
        self.settings.save();
    }

    /// Window lost focus
    pub fn blur(&mut self) {
        if self.settings.pause_on_blur && self.driver.state.is_active() {
            session::pause_toggle(&mut self.driver.state);
            log::info!("Auto-paused (window blur)");
        }
        self.driver.resync();
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.audio.apply_settings(&self.settings);
        self.settings.save();
    }

    /// HUD values as JSON
    pub fn hud_json(&self) -> String {
        serde_json::to_string(&HudView::from_state(&self.driver.state)).unwrap_or_default()
    }

    /// Scene geometry as JSON
    pub fn scene_json(&self) -> String {
        serde_json::to_string(&SceneView::from_state(&self.driver.state, self.settings.reduced_motion))
            .unwrap_or_default()
    }

    pub fn score(&self) -> f64 {
        self.driver.state.score as f64
    }

    pub fn lives(&self) -> u32 {
        self.driver.state.lives
    }

    pub fn level(&self) -> u32 {
        self.driver.state.level
    }

    pub fn running(&self) -> bool {
        self.driver.state.running()
    }

    pub fn paused(&self) -> bool {
        self.driver.state.paused()
    }

    pub fn last_event_was_hit(&self) -> bool {
        matches!(self.last_event, StepEvent::Hit { .. } | StepEvent::GameOver)
    }
}
