//! Rope Jump - A single-screen jump rope reflex game
//!
//! Core modules:
//! - `sim`: Simulation (rope sweep, player jumps, pass detection, scoring, session phases)
//! - `driver`: Frame clock and the loop that feeds `sim::session::step`
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (volume, starting mode)
//! - `audio`: Sound cues reacting to simulation events
//! - `ui`: Read-only HUD and scene views for rendering collaborators

pub mod audio;
pub mod driver;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::DVec2;

/// Game configuration constants
///
/// These encode tuned game feel. `Tuning::default()` mirrors them.
pub mod consts {
    use std::f64::consts::PI;

    /// Largest frame delta the driver will hand to the simulation (seconds)
    pub const MAX_FRAME_DT: f64 = 0.033;

    /// Lives at the start of a run
    pub const START_LIVES: u32 = 3;

    /// Rope defaults
    pub const ROPE_START_ANGLE: f64 = PI * 1.5;
    pub const ROPE_BASE_SPEED: f64 = 2.6; // rad/s at 1.0x
    pub const ROPE_THICKNESS: f64 = 6.0;
    pub const ROPE_DEFAULT_RADIUS: f64 = 120.0;
    pub const ROPE_DEFAULT_LENGTH: f64 = 340.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f64 = 14.0;
    /// Upward velocity on jump (pixels per step, applied as displacement)
    pub const JUMP_FORCE: f64 = 8.6;
    pub const GRAVITY: f64 = 22.0;

    /// Continuous difficulty ramp (multiplier per second)
    pub const SPEED_RAMP_PER_SEC: f64 = 0.02;
    /// Speed multiplier scale after a hit (clamped to >= 1)
    pub const HIT_SPEED_PENALTY: f64 = 0.92;
    /// Pass window width relative to one step's angular delta
    pub const PASS_WINDOW_WIDEN: f64 = 1.2;
    /// Clearance below `thickness * this` counts as a hit
    pub const CLEARANCE_FACTOR: f64 = 0.85;

    /// Scoring
    pub const POINTS_PER_CLEAR: u64 = 10;
    pub const COMBO_BONUS_RATE: f64 = 0.6;

    /// Levels mode
    pub const COMBO_PER_LEVEL: u32 = 10;
    pub const LEVEL_SPEED_BONUS: f64 = 0.15;
    pub const LEVEL_JUMP_BONUS: f64 = 0.1;

    /// Arena layout
    pub const PIVOT_HEIGHT_RATIO: f64 = 0.48;
    pub const GROUND_OFFSET: f64 = 110.0;
    pub const ROPE_RADIUS_RATIO: f64 = 0.23;
    pub const ROPE_RADIUS_MIN: f64 = 110.0;
    pub const ROPE_RADIUS_MAX: f64 = 160.0;
    pub const ROPE_LENGTH_RATIO: f64 = 2.3;
}

/// Wrap an angle to [0, 2π)
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(PI * 1.5) - PI * 1.5).abs() < 1e-12);
        assert!((wrap_angle(TAU + FRAC_PI_2) - FRAC_PI_2).abs() < 1e-12);
        assert!(wrap_angle(10.0 * TAU) < 1e-9 || (TAU - wrap_angle(10.0 * TAU)) < 1e-9);
    }

    #[test]
    fn test_polar_to_cartesian_lowest_point() {
        // Screen coordinates grow downward, so π/2 points at the ground.
        let p = polar_to_cartesian(100.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 100.0).abs() < 1e-9);
    }
}
