//! Session control: start, pause, reset, mode switch and jump admission
//!
//! Phase transitions:
//! - `NotStarted -> Running` on `start`, or on a jump request (tap to start)
//! - `Running <-> Paused` on `pause_toggle`
//! - `Running -> GameOver` when the last life is lost inside `step`
//! - any phase `-> NotStarted` on `reset` or `set_mode`

use super::arena;
use super::state::{GameMode, GamePhase, GameState, StepEvent};
use super::tick::advance;

/// Create a fresh game for a viewport
pub fn initialize(viewport_width: f64, viewport_height: f64) -> GameState {
    GameState::new(viewport_width, viewport_height)
}

/// Recompute arena geometry after the viewport changed
pub fn on_resize(state: &mut GameState, viewport_width: f64, viewport_height: f64) {
    let layout = arena::layout(viewport_width, viewport_height);
    arena::apply_layout(state, &layout);
    state.viewport = (viewport_width, viewport_height);
}

/// Advance one frame. Does nothing unless the session is running.
pub fn step(state: &mut GameState, dt: f64) -> StepEvent {
    if !state.is_active() {
        return StepEvent::None;
    }
    advance(state, dt)
}

/// Begin play from the title screen
pub fn start(state: &mut GameState) {
    if state.phase == GamePhase::NotStarted {
        state.phase = GamePhase::Running;
        log::info!("Run started ({} mode)", state.mode.as_str());
    }
}

/// Toggle between running and paused. Ignored in other phases.
pub fn pause_toggle(state: &mut GameState) {
    state.phase = match state.phase {
        GamePhase::Running => GamePhase::Paused,
        GamePhase::Paused => GamePhase::Running,
        other => other,
    };
}

/// Jump if standing on the ground during a run.
///
/// On the title screen this also starts the run. Returns whether a jump
/// actually happened; a rejected request leaves the player untouched.
pub fn request_jump(state: &mut GameState) -> bool {
    start(state);

    if state.phase != GamePhase::Running || !state.player.on_ground {
        return false;
    }

    state.player.vy = -state.player.jump_force;
    state.player.on_ground = false;
    true
}

/// Hard reset back to the title screen with default run values
pub fn reset(state: &mut GameState) {
    state.reset_run();
    log::info!("Session reset");
}

/// Switch mode. Always starts over, even when the mode is unchanged.
pub fn set_mode(state: &mut GameState, mode: GameMode) {
    state.mode = mode;
    log::info!("Mode: {}", mode.as_str());
    reset(state);
}

/// Flip between Endless and Levels
pub fn toggle_mode(state: &mut GameState) {
    set_mode(state, state.mode.toggled());
}
