//! Rope Jump entry point
//!
//! The web build starts from `rope_jump::web`. Natively this runs a headless
//! session with the autopilot jumping, which is handy for checking tuning
//! files.
//!
//! Usage: `rope-jump [seconds] [endless|levels] [tuning.json] [settings.json]`
//!
//! Pass `-` for the tuning file to keep the built-in balance. The settings
//! file is created with defaults if it does not exist. Its
//! `start_mode` is used when no mode is given and its audio preferences feed
//! the (silent) sound log.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rope Jump (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);
    let mode = args.next().and_then(|s| rope_jump::sim::GameMode::from_str(&s));
    let tuning = match args.next().filter(|p| p != "-") {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Tuning file {} rejected: {}", path, e);
                std::process::exit(2);
            }
        },
        None => rope_jump::Tuning::default(),
    };
    let settings = match args.next() {
        Some(path) => match rope_jump::Settings::load_or_create(std::path::Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Settings file {} rejected: {}", path, e);
                std::process::exit(2);
            }
        },
        None => rope_jump::Settings::default(),
    };
    let mode = mode.unwrap_or(settings.start_mode);

    match headless::run(seconds, mode, tuning, &settings) {
        Ok(report) => println!("{report}"),
        Err(e) => {
            log::warn!("Tuning rejected: {}", e);
            std::process::exit(2);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<rope_jump::Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(rope_jump::Tuning::from_json(&json)?)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is rope_jump::web::wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rope_jump::audio::AudioManager;
    use rope_jump::driver::{Collaborator, Driver, FixedRateClock};
    use rope_jump::sim::{GameMode, GameState, StepEvent, autopilot, session};
    use rope_jump::tuning::TuningError;
    use rope_jump::ui::HudView;
    use rope_jump::{Settings, Tuning};

    /// Display refresh rate the headless loop pretends to run at
    const FRAME_RATE: f64 = 60.0;
    const VIEWPORT: (f64, f64) = (480.0, 800.0);

    /// Logs notable events as they happen
    struct EventLog {
        clears: u32,
        hits: u32,
    }

    impl Collaborator for EventLog {
        fn observe(&mut self, state: &GameState, event: StepEvent) {
            match event {
                StepEvent::None => {}
                StepEvent::Cleared { gained, level_up } => {
                    self.clears += 1;
                    if level_up {
                        log::info!("Level {} at score {}", state.level, state.score);
                    } else {
                        log::debug!("+{} (combo {})", gained, state.combo);
                    }
                }
                StepEvent::Hit { lives_left } => {
                    self.hits += 1;
                    log::info!("Hit! {} lives left", lives_left);
                }
                StepEvent::GameOver => {
                    self.hits += 1;
                    log::info!("Game over at score {}", state.score);
                }
            }
        }
    }

    pub fn run(
        seconds: f64,
        mode: GameMode,
        tuning: Tuning,
        settings: &Settings,
    ) -> Result<String, TuningError> {
        let mut state = GameState::with_tuning(VIEWPORT.0, VIEWPORT.1, tuning)?;
        session::set_mode(&mut state, mode);

        let mut driver = Driver::new(state, FixedRateClock::new(FRAME_RATE));
        let mut audio = AudioManager::from_settings(settings);
        let mut events = EventLog { clears: 0, hits: 0 };

        let frames = (seconds.max(0.0) * FRAME_RATE).ceil() as u64;
        for _ in 0..frames {
            autopilot::drive(&mut driver.state);
            let mut collaborators: [&mut dyn Collaborator; 2] = [&mut events, &mut audio];
            driver.frame(&mut collaborators);
            if driver.state.is_game_over() {
                break;
            }
        }

        let hud = HudView::from_state(&driver.state);
        Ok(format!(
            "{} | {:.1}s ({} frames) | score {} | level {} | lives {} | speed {} | clears {} hits {} | sounds {}",
            hud.mode,
            driver.frames() as f64 / FRAME_RATE,
            driver.frames(),
            hud.score,
            hud.level,
            hud.lives,
            hud.speed,
            events.clears,
            events.hits,
            audio.played().len(),
        ))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_run_rejects_invalid_tuning() {
            let tuning = Tuning {
                combo_per_level: 0,
                ..Default::default()
            };
            let result = run(5.0, GameMode::Levels, tuning, &Settings::default());
            assert!(matches!(result, Err(TuningError::OutOfRange { field: "combo_per_level", .. })));
        }

        #[test]
        fn test_run_starts_and_reports_mode() {
            let report = run(3.0, GameMode::Levels, Tuning::default(), &Settings::default()).unwrap();
            assert!(report.starts_with("Mode: Levels"), "{report}");
        }

        #[test]
        fn test_run_uses_settings_audio() {
            let settings = Settings {
                muted: true,
                ..Default::default()
            };
            let report = run(3.0, GameMode::Endless, Tuning::default(), &settings).unwrap();
            assert!(report.ends_with("sounds 0"), "{report}");
        }
    }
}
