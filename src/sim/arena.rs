//! Arena geometry from viewport size

use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Geometry for one viewport size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaLayout {
    pub center_x: f64,
    pub center_y: f64,
    pub ground_y: f64,
    pub rope_radius: f64,
    pub rope_length: f64,
}

/// Compute the arena for a viewport.
///
/// Panics on non-positive or non-finite dimensions; callers own viewport
/// validation.
pub fn layout(viewport_width: f64, viewport_height: f64) -> ArenaLayout {
    assert!(
        viewport_width.is_finite() && viewport_width > 0.0,
        "viewport width must be positive, got {viewport_width}"
    );
    assert!(
        viewport_height.is_finite() && viewport_height > 0.0,
        "viewport height must be positive, got {viewport_height}"
    );

    let center_x = viewport_width / 2.0;
    let center_y = viewport_height * PIVOT_HEIGHT_RATIO;
    let rope_radius = (viewport_width.min(viewport_height) * ROPE_RADIUS_RATIO)
        .clamp(ROPE_RADIUS_MIN, ROPE_RADIUS_MAX);

    ArenaLayout {
        center_x,
        center_y,
        ground_y: center_y + GROUND_OFFSET,
        rope_radius,
        rope_length: rope_radius * ROPE_LENGTH_RATIO,
    }
}

/// Write a layout into the state.
///
/// A player in mid-jump during a run keeps their height above the ground so
/// the jump is not cut short; everyone else is stood on the new ground line.
pub fn apply_layout(state: &mut GameState, layout: &ArenaLayout) {
    let old_ground = state.arena.ground_y;

    state.arena.center_x = layout.center_x;
    state.arena.center_y = layout.center_y;
    state.arena.ground_y = layout.ground_y;
    state.rope.radius = layout.rope_radius;
    state.rope.length = layout.rope_length;

    let player = &mut state.player;
    player.x = layout.center_x;

    let mid_jump = !player.on_ground
        && matches!(state.phase, GamePhase::Running | GamePhase::Paused);
    if mid_jump {
        player.y += layout.ground_y - old_ground;
        if player.y >= player.rest_y(layout.ground_y) {
            player.land(layout.ground_y);
        }
    } else {
        player.land(layout.ground_y);
    }
}
