//! Simulation module
//!
//! All gameplay logic lives here. No rendering, audio or platform
//! dependencies: the state goes in, a `StepEvent` comes out.
//! - `state`: the game snapshot and its parts
//! - `arena`: viewport-derived geometry
//! - `tick`: one frame of rope, player and scoring
//! - `session`: phase transitions and jump admission
//! - `autopilot`: demo player

pub mod arena;
pub mod autopilot;
pub mod session;
pub mod state;
pub mod tick;

pub use arena::{ArenaLayout, apply_layout, layout};
pub use session::{
    initialize, on_resize, pause_toggle, request_jump, reset, set_mode, start, step, toggle_mode,
};
pub use state::{Arena, GameMode, GamePhase, GameState, Player, Rope, StepEvent};
pub use tick::{advance, in_pass_window};
