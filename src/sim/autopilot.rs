//! Idle/demo mode - the game plays itself
//!
//! Starts a run from the title screen, then jumps shortly before the rope
//! reaches the pass angle. Used by the headless native runner and by the
//! attract screen on web.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::session;
use super::state::{GamePhase, GameState};
use crate::wrap_angle;

/// How long before the rope's low point to leave the ground (seconds)
pub const JUMP_LEAD_TIME: f64 = 0.3;

/// Seconds until the rope next sweeps through the pass angle
pub fn time_to_pass(state: &GameState) -> f64 {
    let speed = state.effective_rope_speed();
    if speed <= 0.0 {
        return f64::INFINITY;
    }
    let remaining = wrap_angle(FRAC_PI_2 - state.rope.angle);
    // Sitting exactly on the low point means a full turn to go
    let remaining = if remaining == 0.0 { TAU } else { remaining };
    remaining / speed
}

/// Whether the autopilot wants to jump this frame
pub fn should_jump(state: &GameState) -> bool {
    state.player.on_ground && time_to_pass(state) < JUMP_LEAD_TIME
}

/// Play one frame's input: auto-start on the title screen, jump when due.
///
/// Game over is left alone; only a reset starts the next run.
pub fn drive(state: &mut GameState) {
    if state.phase == GamePhase::NotStarted {
        session::start(state);
    }
    if should_jump(state) {
        session::request_jump(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session;
    use crate::sim::state::{GameMode, StepEvent};

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_time_to_pass_from_start() {
        let state = GameState::new(480.0, 800.0);
        // Rope starts straight up: half a turn from the bottom
        let expected = std::f64::consts::PI / state.effective_rope_speed();
        assert!((time_to_pass(&state) - expected).abs() < 1e-9);
        assert!(!should_jump(&state));
    }

    #[test]
    fn test_drive_starts_from_title_screen() {
        let mut state = session::initialize(480.0, 800.0);
        drive(&mut state);
        assert_eq!(state.phase, GamePhase::Running);

        let mut clears = 0;
        for _ in 0..(5 * 60) {
            drive(&mut state);
            if matches!(session::step(&mut state, DT), StepEvent::Cleared { .. }) {
                clears += 1;
            }
        }
        assert!(clears >= 1, "attract mode never cleared the rope");
    }

    #[test]
    fn test_drive_leaves_game_over_alone() {
        let mut state = session::initialize(480.0, 800.0);
        state.phase = GamePhase::GameOver;
        state.lives = 0;
        drive(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.player.on_ground);
    }

    #[test]
    fn test_autopilot_survives_endless() {
        let mut state = session::initialize(480.0, 800.0);
        session::start(&mut state);

        let mut clears = 0;
        for _ in 0..(30 * 60) {
            if should_jump(&state) {
                session::request_jump(&mut state);
            }
            match session::step(&mut state, DT) {
                StepEvent::Cleared { .. } => clears += 1,
                StepEvent::None => {}
                other => panic!("autopilot was caught: {other:?}"),
            }
        }
        assert_eq!(state.lives, 3);
        assert!(clears >= 10, "only {clears} clears in 30 s");
        assert_eq!(state.combo, clears);
    }

    #[test]
    fn test_autopilot_levels_up() {
        let mut state = session::initialize(480.0, 800.0);
        session::set_mode(&mut state, GameMode::Levels);
        session::start(&mut state);

        for _ in 0..(30 * 60) {
            if should_jump(&state) {
                session::request_jump(&mut state);
            }
            session::step(&mut state, DT);
        }
        assert!(state.level >= 2, "combo {} level {}", state.combo, state.level);
    }
}
