//! Variable timestep simulation step
//!
//! Advances rope, player and scoring by one frame delta. The result depends on
//! the delta sequence the driver feeds in: jump height is integrated per step,
//! not per second, and the pass window is sized from this step's sweep. The
//! driver's `max_frame_dt` clamp keeps both bounded.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::state::{GameMode, GamePhase, GameState, Player, StepEvent};
use crate::wrap_angle;

/// Advance the game state by `dt` seconds.
///
/// Callers must only invoke this while the session is running
/// (`session::step` enforces it). Panics on a negative or non-finite `dt`.
pub fn advance(state: &mut GameState, dt: f64) -> StepEvent {
    assert!(dt.is_finite() && dt >= 0.0, "frame delta must be non-negative, got {dt}");
    debug_assert!(state.is_active(), "advance called outside a running session");

    // Difficulty ramp
    state.speed_multiplier += dt * state.tuning.speed_ramp_per_sec;

    // Rope sweep
    let rope_speed = state.effective_rope_speed();
    state.rope.angle += rope_speed * dt;

    integrate_player(&mut state.player, state.arena.ground_y, dt);

    // Pass window: the rope has just swept through its lowest point
    let window = rope_speed * dt * state.tuning.pass_window_widen;
    if !in_pass_window(state.rope.angle, window) {
        return StepEvent::None;
    }

    // The widened window can catch two consecutive steps of the same sweep
    let turn = revolution_index(state.rope.angle);
    if state.rope.last_pass_turn == Some(turn) {
        return StepEvent::None;
    }
    state.rope.last_pass_turn = Some(turn);

    resolve_pass(state)
}

/// Whether `angle` sits just past the lowest point, within `window` radians
#[inline]
pub fn in_pass_window(angle: f64, window: f64) -> bool {
    let wrapped = wrap_angle(angle);
    wrapped > FRAC_PI_2 && wrapped < FRAC_PI_2 + window
}

/// Which revolution an angle belongs to
#[inline]
fn revolution_index(angle: f64) -> i64 {
    ((angle - wrap_angle(angle)) / TAU).round() as i64
}

/// Vertical motion for an airborne player.
///
/// Velocity is applied as a whole displacement each step.
fn integrate_player(player: &mut Player, ground_y: f64, dt: f64) {
    if player.on_ground {
        return;
    }

    player.vy += player.gravity * dt;
    player.y += player.vy;

    if player.y >= player.rest_y(ground_y) {
        player.land(ground_y);
    }
}

/// Score or penalise the sweep that just happened
fn resolve_pass(state: &mut GameState) -> StepEvent {
    let clearance = state.player.clearance(state.arena.ground_y);
    let needed = state.rope.thickness * state.tuning.clearance_factor;

    if clearance < needed {
        state.lives = state.lives.saturating_sub(1);
        state.combo = 0;
        state.speed_multiplier = (state.speed_multiplier * state.tuning.hit_speed_penalty).max(1.0);

        log::debug!(
            "Hit: clearance {:.2} < {:.2}, lives {}, speed {:.3}x",
            clearance,
            needed,
            state.lives,
            state.speed_multiplier
        );

        if state.lives == 0 {
            state.phase = GamePhase::GameOver;
            log::info!("Game over: score {}, level {}", state.score, state.level);
            return StepEvent::GameOver;
        }
        return StepEvent::Hit { lives_left: state.lives };
    }

    state.combo += 1;
    let bonus = (state.combo as f64 * state.tuning.combo_bonus_rate).floor() as u64;
    let gained = state.tuning.points_per_clear + bonus;
    state.score += gained;

    let level_up = state.mode == GameMode::Levels
        && state.combo % state.tuning.combo_per_level == 0;
    if level_up {
        state.level += 1;
        state.speed_multiplier += state.tuning.level_speed_bonus;
        state.player.jump_force += state.tuning.level_jump_bonus;
        log::info!(
            "Level {} reached (combo {}), speed {:.2}x",
            state.level,
            state.combo,
            state.speed_multiplier
        );
    }

    log::debug!(
        "Clear: clearance {:.2}, combo {}, +{} -> {}",
        clearance,
        state.combo,
        gained,
        state.score
    );

    StepEvent::Cleared { gained, level_up }
}
