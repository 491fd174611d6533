//! Audio cues for simulation events
//!
//! Procedurally generated beeps - no external files needed. On web the cues
//! play through the Web Audio API; natively they are recorded so headless
//! runs and tests can see what would have played.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, OscillatorType};

use crate::driver::Collaborator;
use crate::settings::Settings;
use crate::sim::{GameState, StepEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Rope passed under the player
    Clear,
    /// Rope caught the player (including the final hit)
    Hit,
}

impl SoundEffect {
    /// Which effect, if any, a step event triggers
    pub fn for_event(event: StepEvent) -> Option<Self> {
        match event {
            StepEvent::None => None,
            StepEvent::Cleared { .. } => Some(SoundEffect::Clear),
            StepEvent::Hit { .. } | StepEvent::GameOver => Some(SoundEffect::Hit),
        }
    }

    /// Tone parameters for this effect
    pub fn cue(&self) -> ToneCue {
        match self {
            SoundEffect::Clear => ToneCue {
                frequency: 880.0,
                duration: 0.06,
                waveform: Waveform::Sine,
                gain: 0.05,
            },
            SoundEffect::Hit => ToneCue {
                frequency: 200.0,
                duration: 0.12,
                waveform: Waveform::Square,
                gain: 0.06,
            },
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

/// A single fixed-pitch beep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCue {
    /// Hz
    pub frequency: f32,
    /// Seconds
    pub duration: f64,
    pub waveform: Waveform,
    /// Peak gain before volume settings
    pub gain: f32,
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    /// Cues that would have played (native builds)
    #[cfg(not(target_arch = "wasm32"))]
    played: Vec<(SoundEffect, f32)>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            // Created on first play: browsers refuse audio before a user gesture
            #[cfg(target_arch = "wasm32")]
            ctx: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            #[cfg(not(target_arch = "wasm32"))]
            played: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let cue = effect.cue();
        self.emit(effect, cue, cue.gain * vol);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn emit(&mut self, effect: SoundEffect, _cue: ToneCue, gain: f32) {
        log::trace!("Sound {:?} at gain {:.3}", effect, gain);
        self.played.push((effect, gain));
    }

    /// Effects played so far with their final gain
    #[cfg(not(target_arch = "wasm32"))]
    pub fn played(&self) -> &[(SoundEffect, f32)] {
        &self.played
    }

    #[cfg(target_arch = "wasm32")]
    fn emit(&mut self, _effect: SoundEffect, cue: ToneCue, gain: f32) {
        if self.ctx.is_none() {
            match AudioContext::new() {
                Ok(ctx) => self.ctx = Some(ctx),
                Err(_) => {
                    log::warn!("Failed to create AudioContext - audio disabled");
                    self.muted = true;
                    return;
                }
            }
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        play_tone(ctx, cue, gain);
    }
}

#[cfg(target_arch = "wasm32")]
fn play_tone(ctx: &AudioContext, cue: ToneCue, gain_value: f32) -> Option<()> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(match cue.waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
    });
    let t = ctx.current_time();
    osc.frequency().set_value_at_time(cue.frequency, t).ok()?;
    gain.gain().set_value(gain_value);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    osc.start().ok()?;
    osc.stop_with_when(t + cue.duration).ok()?;
    Some(())
}

impl Collaborator for AudioManager {
    fn observe(&mut self, _state: &GameState, event: StepEvent) {
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}
