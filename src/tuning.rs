//! Data-driven game balance
//!
//! Every tuned constant in one serializable struct. Missing JSON fields fall
//! back to the defaults in `crate::consts`, so a tuning file only needs to
//! name what it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub start_lives: u32,
    pub rope_base_speed: f64,
    pub rope_thickness: f64,
    pub player_radius: f64,
    pub jump_force: f64,
    pub gravity: f64,
    pub speed_ramp_per_sec: f64,
    pub hit_speed_penalty: f64,
    pub pass_window_widen: f64,
    pub clearance_factor: f64,
    pub points_per_clear: u64,
    pub combo_bonus_rate: f64,
    pub combo_per_level: u32,
    pub level_speed_bonus: f64,
    pub level_jump_bonus: f64,
    /// Frame delta clamp applied by the driver
    pub max_frame_dt: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            start_lives: START_LIVES,
            rope_base_speed: ROPE_BASE_SPEED,
            rope_thickness: ROPE_THICKNESS,
            player_radius: PLAYER_RADIUS,
            jump_force: JUMP_FORCE,
            gravity: GRAVITY,
            speed_ramp_per_sec: SPEED_RAMP_PER_SEC,
            hit_speed_penalty: HIT_SPEED_PENALTY,
            pass_window_widen: PASS_WINDOW_WIDEN,
            clearance_factor: CLEARANCE_FACTOR,
            points_per_clear: POINTS_PER_CLEAR,
            combo_bonus_rate: COMBO_BONUS_RATE,
            combo_per_level: COMBO_PER_LEVEL,
            level_speed_bonus: LEVEL_SPEED_BONUS,
            level_jump_bonus: LEVEL_JUMP_BONUS,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("rope_base_speed", self.rope_base_speed),
            ("rope_thickness", self.rope_thickness),
            ("player_radius", self.player_radius),
            ("jump_force", self.jump_force),
            ("gravity", self.gravity),
            ("pass_window_widen", self.pass_window_widen),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::OutOfRange { field, value });
            }
        }

        let non_negative = [
            ("speed_ramp_per_sec", self.speed_ramp_per_sec),
            ("clearance_factor", self.clearance_factor),
            ("combo_bonus_rate", self.combo_bonus_rate),
            ("level_speed_bonus", self.level_speed_bonus),
            ("level_jump_bonus", self.level_jump_bonus),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::OutOfRange { field, value });
            }
        }

        if !(self.hit_speed_penalty > 0.0 && self.hit_speed_penalty <= 1.0) {
            return Err(TuningError::OutOfRange {
                field: "hit_speed_penalty",
                value: self.hit_speed_penalty,
            });
        }
        if self.start_lives == 0 {
            return Err(TuningError::OutOfRange { field: "start_lives", value: 0.0 });
        }
        if self.combo_per_level == 0 {
            return Err(TuningError::OutOfRange { field: "combo_per_level", value: 0.0 });
        }
        Ok(())
    }
}
