//! Frame clock and game loop driver
//!
//! The display (requestAnimationFrame on web, a fixed-rate loop natively)
//! supplies timestamps. `FrameClock` turns them into clamped frame deltas and
//! `Driver` feeds those into the session, then lets collaborators look at the
//! result. Collaborators only get `&GameState`.

use crate::sim::{GameState, StepEvent, session};

/// Converts absolute timestamps into clamped frame deltas
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<f64>,
    max_dt: f64,
}

impl FrameClock {
    pub fn new(max_dt: f64) -> Self {
        Self { last: None, max_dt }
    }

    /// Delta since the previous timestamp, in seconds.
    ///
    /// The first call yields 0. Stalls are clamped to `max_dt` and a clock
    /// that runs backwards yields 0.
    pub fn delta(&mut self, now: f64) -> f64 {
        let dt = match self.last {
            Some(last) => (now - last).clamp(0.0, self.max_dt),
            None => 0.0,
        };
        self.last = Some(now);
        dt
    }

    /// Forget the last timestamp (after a visibility change, for instance)
    pub fn resync(&mut self) {
        self.last = None;
    }
}

/// Source of frame timestamps (seconds)
pub trait TimeSource {
    fn now(&mut self) -> f64;
}

/// Synthetic clock advancing by a fixed interval per frame
#[derive(Debug, Clone)]
pub struct FixedRateClock {
    time: f64,
    interval: f64,
}

impl FixedRateClock {
    pub fn new(hz: f64) -> Self {
        assert!(hz > 0.0, "clock rate must be positive, got {hz}");
        Self { time: 0.0, interval: 1.0 / hz }
    }
}

impl TimeSource for FixedRateClock {
    fn now(&mut self) -> f64 {
        let t = self.time;
        self.time += self.interval;
        t
    }
}

/// Clock fed from outside, e.g. by requestAnimationFrame timestamps
#[derive(Debug, Clone, Default)]
pub struct PushedClock {
    latest: f64,
}

impl PushedClock {
    /// Record the timestamp (seconds) for the coming frame
    pub fn push(&mut self, now: f64) {
        self.latest = now;
    }
}

impl TimeSource for PushedClock {
    fn now(&mut self) -> f64 {
        self.latest
    }
}

/// Something that reacts to simulation results without changing them
pub trait Collaborator {
    fn observe(&mut self, state: &GameState, event: StepEvent);
}

/// Owns the game and advances it once per frame
pub struct Driver<T: TimeSource> {
    pub state: GameState,
    source: T,
    clock: FrameClock,
    frames: u64,
}

impl<T: TimeSource> Driver<T> {
    pub fn new(state: GameState, source: T) -> Self {
        let clock = FrameClock::new(state.tuning.max_frame_dt);
        Self {
            state,
            source,
            clock,
            frames: 0,
        }
    }

    /// Run one display frame: step the session, then notify collaborators
    pub fn frame(&mut self, collaborators: &mut [&mut dyn Collaborator]) -> StepEvent {
        let dt = self.clock.delta(self.source.now());
        let event = session::step(&mut self.state, dt);
        self.frames += 1;

        for collaborator in collaborators.iter_mut() {
            collaborator.observe(&self.state, event);
        }
        event
    }

    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Drop the last timestamp so the next frame starts with a zero delta
    pub fn resync(&mut self) {
        self.clock.resync();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_DT;
    use crate::sim::GamePhase;

    #[test]
    fn test_frame_clock_first_frame_is_zero() {
        let mut clock = FrameClock::new(MAX_FRAME_DT);
        assert_eq!(clock.delta(12.5), 0.0);
        assert!((clock.delta(12.516) - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_frame_clock_clamps_stalls() {
        let mut clock = FrameClock::new(MAX_FRAME_DT);
        clock.delta(1.0);
        assert_eq!(clock.delta(3.0), MAX_FRAME_DT);
    }

    #[test]
    fn test_frame_clock_never_negative() {
        let mut clock = FrameClock::new(MAX_FRAME_DT);
        clock.delta(5.0);
        assert_eq!(clock.delta(4.0), 0.0);
        clock.resync();
        assert_eq!(clock.delta(100.0), 0.0);
    }

    #[test]
    fn test_fixed_rate_clock() {
        let mut source = FixedRateClock::new(50.0);
        assert_eq!(source.now(), 0.0);
        assert!((source.now() - 0.02).abs() < 1e-12);
    }

    struct Recorder {
        events: Vec<StepEvent>,
        last_score: u64,
    }

    impl Collaborator for Recorder {
        fn observe(&mut self, state: &GameState, event: StepEvent) {
            self.events.push(event);
            self.last_score = state.score;
        }
    }

    #[test]
    fn test_driver_steps_running_session() {
        let mut state = session::initialize(480.0, 800.0);
        session::start(&mut state);
        let start_angle = state.rope.angle;

        let mut driver = Driver::new(state, FixedRateClock::new(60.0));
        let mut recorder = Recorder { events: Vec::new(), last_score: 0 };

        for _ in 0..10 {
            let mut collaborators: [&mut dyn Collaborator; 1] = [&mut recorder];
            driver.frame(&mut collaborators);
        }

        assert_eq!(driver.frames(), 10);
        assert_eq!(recorder.events.len(), 10);
        assert_eq!(recorder.last_score, driver.state.score);
        assert_eq!(driver.state.phase, GamePhase::Running);
        // First frame has a zero delta, the other nine advance the rope
        let expected = 9.0 / 60.0 * crate::consts::ROPE_BASE_SPEED;
        assert!((driver.state.rope.angle - start_angle - expected).abs() < 1e-2);
    }

    #[test]
    fn test_driver_resync_skips_gap() {
        let mut state = session::initialize(480.0, 800.0);
        session::start(&mut state);
        let mut driver = Driver::new(state, PushedClock::default());
        let mut collaborators: [&mut dyn Collaborator; 0] = [];

        driver.source_mut().push(1.0);
        driver.frame(&mut collaborators);
        driver.source_mut().push(1.016);
        driver.frame(&mut collaborators);
        let angle = driver.state.rope.angle;
        assert!(angle > crate::consts::ROPE_START_ANGLE);

        // Window hidden for a while: no delta is carried across the gap
        driver.resync();
        driver.source_mut().push(9.0);
        driver.frame(&mut collaborators);
        assert_eq!(driver.state.rope.angle, angle);

        driver.source_mut().push(9.02);
        driver.frame(&mut collaborators);
        assert!(driver.state.rope.angle > angle);
    }

    #[test]
    fn test_driver_idle_before_start() {
        let state = session::initialize(480.0, 800.0);
        let angle = state.rope.angle;
        let mut driver = Driver::new(state, FixedRateClock::new(60.0));
        let mut collaborators: [&mut dyn Collaborator; 0] = [];
        for _ in 0..5 {
            assert_eq!(driver.frame(&mut collaborators), StepEvent::None);
        }
        assert_eq!(driver.state.rope.angle, angle);
    }
}
