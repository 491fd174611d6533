//! Game state and core simulation types
//!
//! `GameState` is the single authoritative snapshot of a game. It is owned by
//! whoever drives the session and passed explicitly to every operation;
//! rendering, HUD and audio only ever see `&GameState`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::arena;
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::tuning::{Tuning, TuningError};

/// Which progression rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Speed ramps forever, level stays at 1
    #[default]
    Endless,
    /// Every `combo_per_level` consecutive clears advances the level
    Levels,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Endless => "Endless",
            GameMode::Levels => "Levels",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "endless" => Some(GameMode::Endless),
            "levels" | "level" => Some(GameMode::Levels),
            _ => None,
        }
    }

    /// The other mode (what the mode button switches to)
    pub fn toggled(&self) -> Self {
        match self {
            GameMode::Endless => GameMode::Levels,
            GameMode::Levels => GameMode::Endless,
        }
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start or a jump
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Mid-run pause
    Paused,
    /// Out of lives; only reset or a mode switch leaves this phase
    GameOver,
}

/// Signal produced by one simulation step for collaborators to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepEvent {
    /// Nothing noteworthy happened (or the step was skipped)
    #[default]
    None,
    /// The rope passed under the player
    Cleared { gained: u64, level_up: bool },
    /// The rope caught the player, lives remain
    Hit { lives_left: u32 },
    /// The rope caught the player on their last life
    GameOver,
}

/// The rotating rope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rope {
    /// Current angle (radians, unbounded; wrap only for geometry)
    pub angle: f64,
    /// Angular speed at 1.0x multiplier (rad/s)
    pub base_angular_speed: f64,
    pub radius: f64,
    /// Drawn length (rendering only)
    pub length: f64,
    pub thickness: f64,
    /// Revolution index of the last pass event, so a sweep scores once
    #[serde(default)]
    pub last_pass_turn: Option<i64>,
}

impl Rope {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            angle: ROPE_START_ANGLE,
            base_angular_speed: tuning.rope_base_speed,
            radius: ROPE_DEFAULT_RADIUS,
            length: ROPE_DEFAULT_LENGTH,
            thickness: tuning.rope_thickness,
            last_pass_turn: None,
        }
    }

    /// Angular speed after the difficulty multiplier
    #[inline]
    pub fn angular_speed(&self, speed_multiplier: f64) -> f64 {
        self.base_angular_speed * speed_multiplier
    }

    /// Free end of the rope for a given pivot
    pub fn tip(&self, pivot: DVec2) -> DVec2 {
        pivot + polar_to_cartesian(self.radius, self.angle)
    }
}

/// The jumping player. Horizontal position is pinned to the arena center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    /// Vertical center position (screen space, grows downward)
    pub y: f64,
    /// Vertical velocity, applied as a per-step displacement
    pub vy: f64,
    pub radius: f64,
    pub on_ground: bool,
    pub jump_force: f64,
    pub gravity: f64,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            vy: 0.0,
            radius: tuning.player_radius,
            on_ground: true,
            jump_force: tuning.jump_force,
            gravity: tuning.gravity,
        }
    }

    /// Center height when standing on the ground line
    #[inline]
    pub fn rest_y(&self, ground_y: f64) -> f64 {
        ground_y - self.radius
    }

    /// Gap between the player's lowest point and the ground line
    #[inline]
    pub fn clearance(&self, ground_y: f64) -> f64 {
        ground_y - self.y - self.radius
    }

    /// Put the player at rest on the ground
    pub fn land(&mut self, ground_y: f64) {
        self.y = self.rest_y(ground_y);
        self.vy = 0.0;
        self.on_ground = true;
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Arena geometry derived from the viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub center_x: f64,
    pub center_y: f64,
    pub ground_y: f64,
}

impl Arena {
    /// Rope pivot point
    pub fn pivot(&self) -> DVec2 {
        DVec2::new(self.center_x, self.center_y)
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub mode: GameMode,
    /// Current level (1-based, only advances in Levels mode)
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    /// Consecutive clears since the last hit
    pub combo: u32,
    /// Difficulty multiplier on rope speed, never below 1
    pub speed_multiplier: f64,
    pub rope: Rope,
    pub player: Player,
    pub arena: Arena,
    /// Last viewport size the arena was laid out for
    pub viewport: (f64, f64),
    /// Balance parameters; hard reset restores from these
    pub tuning: Tuning,
}

impl GameState {
    /// Create a new game state laid out for the given viewport
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self::build(viewport_width, viewport_height, Tuning::default())
    }

    /// Create a new game state with custom balance parameters.
    ///
    /// Rejects tuning that fails `Tuning::validate`.
    pub fn with_tuning(
        viewport_width: f64,
        viewport_height: f64,
        tuning: Tuning,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(viewport_width, viewport_height, tuning))
    }

    fn build(viewport_width: f64, viewport_height: f64, tuning: Tuning) -> Self {
        let mut state = Self {
            phase: GamePhase::NotStarted,
            mode: GameMode::default(),
            level: 1,
            lives: tuning.start_lives,
            score: 0,
            combo: 0,
            speed_multiplier: 1.0,
            rope: Rope::new(&tuning),
            player: Player::new(&tuning),
            arena: Arena::default(),
            viewport: (viewport_width, viewport_height),
            tuning,
        };

        let layout = arena::layout(viewport_width, viewport_height);
        arena::apply_layout(&mut state, &layout);

        state
    }

    /// Restore run fields to their defaults. Arena geometry is left alone.
    pub(crate) fn reset_run(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.level = 1;
        self.lives = self.tuning.start_lives;
        self.score = 0;
        self.combo = 0;
        self.speed_multiplier = 1.0;
        self.rope.angle = ROPE_START_ANGLE;
        self.rope.base_angular_speed = self.tuning.rope_base_speed;
        self.rope.last_pass_turn = None;
        self.player.jump_force = self.tuning.jump_force;
        self.player.land(self.arena.ground_y);
    }

    /// True from start until game over (includes pause)
    pub fn running(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }

    /// True while paused or after game over
    pub fn paused(&self) -> bool {
        matches!(self.phase, GamePhase::Paused | GamePhase::GameOver)
    }

    /// Only this phase advances the simulation
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Rope speed right now (rad/s)
    pub fn effective_rope_speed(&self) -> f64 {
        self.rope.angular_speed(self.speed_multiplier)
    }

    pub fn rope_tip(&self) -> DVec2 {
        self.rope.tip(self.arena.pivot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(480.0, 800.0);
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.mode, GameMode::Endless);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed_multiplier, 1.0);
        assert_eq!(state.rope.angle, ROPE_START_ANGLE);
        assert!(state.player.on_ground);
        assert_eq!(state.player.y, state.arena.ground_y - state.player.radius);
        assert!(!state.running());
        assert!(!state.paused());
    }

    #[test]
    fn test_with_tuning_applies_values() {
        let tuning = Tuning {
            start_lives: 5,
            jump_force: 9.5,
            ..Default::default()
        };
        let state = GameState::with_tuning(480.0, 800.0, tuning).unwrap();
        assert_eq!(state.lives, 5);
        assert_eq!(state.player.jump_force, 9.5);
    }

    #[test]
    fn test_with_tuning_rejects_invalid() {
        let no_levels = Tuning {
            combo_per_level: 0,
            ..Default::default()
        };
        let err = GameState::with_tuning(480.0, 800.0, no_levels).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { field: "combo_per_level", .. }));

        let no_lives = Tuning {
            start_lives: 0,
            ..Default::default()
        };
        let err = GameState::with_tuning(480.0, 800.0, no_lives).unwrap_err();
        assert!(matches!(err, TuningError::OutOfRange { field: "start_lives", .. }));
    }

    #[test]
    fn test_phase_flags() {
        let mut state = GameState::new(480.0, 800.0);
        state.phase = GamePhase::Running;
        assert!(state.running() && !state.paused() && state.is_active());
        state.phase = GamePhase::Paused;
        assert!(state.running() && state.paused() && !state.is_active());
        state.phase = GamePhase::GameOver;
        assert!(!state.running() && state.paused() && state.is_game_over());
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(GameMode::Endless.toggled(), GameMode::Levels);
        assert_eq!(GameMode::Levels.toggled(), GameMode::Endless);
        assert_eq!(GameMode::from_str("LEVELS"), Some(GameMode::Levels));
        assert_eq!(GameMode::from_str("arcade"), None);
        assert_eq!(GameMode::Levels.as_str(), "Levels");
    }

    #[test]
    fn test_rope_tip_at_start_points_up() {
        let state = GameState::new(480.0, 800.0);
        let tip = state.rope_tip();
        // 3π/2 is straight up in screen space
        assert!((tip.x - state.arena.center_x).abs() < 1e-9);
        assert!((tip.y - (state.arena.center_y - state.rope.radius)).abs() < 1e-9);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new(480.0, 800.0);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.arena, state.arena);
        assert_eq!(back.lives, state.lives);
    }
}
