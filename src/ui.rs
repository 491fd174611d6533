//! Read-only views for the HUD and renderer
//!
//! Plain data built from `&GameState` between steps. The page (or any other
//! front end) draws from these and never touches the state itself.

use glam::DVec2;
use serde::Serialize;

use crate::sim::{GamePhase, GameState};

/// Number of faded rope copies drawn behind the rope
pub const ROPE_AFTERIMAGES: usize = 8;
/// Angular spacing between afterimages (radians)
pub const AFTERIMAGE_SPACING: f64 = 0.15;

/// Centered message drawn over the arena
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub title: String,
    pub hint: String,
}

impl Overlay {
    pub fn for_state(state: &GameState) -> Option<Self> {
        let (title, hint) = match state.phase {
            GamePhase::Running => return None,
            GamePhase::NotStarted => (
                "Tap to Jump — Avoid the Rope!".to_string(),
                "Press Start to play. Mode toggles Endless/Levels.".to_string(),
            ),
            GamePhase::Paused => ("Paused".to_string(), "Tap Resume to continue".to_string()),
            GamePhase::GameOver => (
                "Game Over".to_string(),
                format!("Score {} - press Reset to play again", state.score),
            ),
        };
        Some(Self { title, hint })
    }
}

/// Everything the HUD shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    pub combo: u32,
    /// e.g. "1.3x"
    pub speed: String,
    /// e.g. "Mode: Endless"
    pub mode: String,
    /// Label for the pause button
    pub pause_label: &'static str,
    pub overlay: Option<Overlay>,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            level: state.level,
            lives: state.lives,
            score: state.score,
            combo: state.combo,
            speed: format!("{:.1}x", state.speed_multiplier),
            mode: format!("Mode: {}", state.mode.as_str()),
            pause_label: if state.paused() { "Resume" } else { "Pause" },
            overlay: Overlay::for_state(state),
        }
    }
}

/// Scene geometry for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneView {
    pub pivot: DVec2,
    pub rope_tip: DVec2,
    pub rope_angle: f64,
    pub rope_radius: f64,
    pub rope_thickness: f64,
    /// Angles of the faded copies, newest first
    pub afterimages: Vec<f64>,
    pub player: DVec2,
    pub player_radius: f64,
    pub on_ground: bool,
    pub ground_y: f64,
    /// Shadow ellipse width under the player
    pub shadow_width: f64,
}

impl SceneView {
    pub fn from_state(state: &GameState, reduced_motion: bool) -> Self {
        let afterimages = if reduced_motion {
            Vec::new()
        } else {
            (1..=ROPE_AFTERIMAGES)
                .map(|i| state.rope.angle - i as f64 * AFTERIMAGE_SPACING)
                .collect()
        };

        let height = state.player.clearance(state.arena.ground_y).abs();

        Self {
            pivot: state.arena.pivot(),
            rope_tip: state.rope_tip(),
            rope_angle: state.rope.angle,
            rope_radius: state.rope.radius,
            rope_thickness: state.rope.thickness,
            afterimages,
            player: state.player.position(),
            player_radius: state.player.radius,
            on_ground: state.player.on_ground,
            ground_y: state.arena.ground_y,
            shadow_width: 28.0 + (height * 0.3).min(16.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::session;

    #[test]
    fn test_hud_labels() {
        let mut state = session::initialize(480.0, 800.0);
        let hud = HudView::from_state(&state);
        assert_eq!(hud.speed, "1.0x");
        assert_eq!(hud.mode, "Mode: Endless");
        assert_eq!(hud.pause_label, "Pause");
        assert_eq!(hud.overlay.unwrap().title, "Tap to Jump — Avoid the Rope!");

        session::toggle_mode(&mut state);
        session::start(&mut state);
        state.speed_multiplier = 1.26;
        let hud = HudView::from_state(&state);
        assert_eq!(hud.speed, "1.3x");
        assert_eq!(hud.mode, "Mode: Levels");
        assert!(hud.overlay.is_none());

        session::pause_toggle(&mut state);
        let hud = HudView::from_state(&state);
        assert_eq!(hud.pause_label, "Resume");
        assert_eq!(hud.overlay.unwrap().title, "Paused");
    }

    #[test]
    fn test_game_over_overlay_shows_score() {
        let mut state = session::initialize(480.0, 800.0);
        state.phase = GamePhase::GameOver;
        state.score = 420;
        let overlay = Overlay::for_state(&state).unwrap();
        assert_eq!(overlay.title, "Game Over");
        assert!(overlay.hint.contains("420"));
    }

    #[test]
    fn test_scene_view() {
        let mut state = session::initialize(480.0, 800.0);
        let scene = SceneView::from_state(&state, false);
        assert_eq!(scene.afterimages.len(), ROPE_AFTERIMAGES);
        assert!((scene.afterimages[0] - (state.rope.angle - AFTERIMAGE_SPACING)).abs() < 1e-12);
        assert_eq!(scene.shadow_width, 28.0);
        assert_eq!(scene.player.x, scene.pivot.x);

        state.player.on_ground = false;
        state.player.y -= 100.0;
        let scene = SceneView::from_state(&state, true);
        assert!(scene.afterimages.is_empty());
        assert_eq!(scene.shadow_width, 44.0);
    }

    #[test]
    fn test_views_serialize_to_json() {
        let state = session::initialize(480.0, 800.0);
        let hud = serde_json::to_value(HudView::from_state(&state)).unwrap();
        assert_eq!(hud["lives"], 3);
        let scene = serde_json::to_value(SceneView::from_state(&state, false)).unwrap();
        assert!(scene["rope_tip"].is_array());
    }
}
