//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no external files needed! Driven entirely by
//! simulation events; every failure is logged and swallowed here.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::PhaseHooks;

/// Delay before a failed cue is tried again
const RETRY_DELAY_MS: i32 = 100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Round begins
    RoundStart,
    /// Upward impulse
    Flap,
    /// Passed a gate
    Score,
    /// Hit a gate or the floor
    Crash,
    /// Reached the winning score
    Victory,
}

/// Looping background tone kept alive while a round is playing
struct Drone {
    oscillators: Vec<OscillatorNode>,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    music_volume: f32,
    drone: Option<Drone>,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: settings.sfx_gain(),
            music_volume: settings.music_gain(),
            drone: None,
        }
    }

    /// Pick up volume/mute changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.sfx_gain();
        self.music_volume = settings.music_gain();
        if let (Some(ctx), Some(drone)) = (&self.ctx, &self.drone) {
            drone
                .gain
                .gain()
                .set_value_at_time(self.music_volume * 0.15, ctx.current_time())
                .ok();
        }
    }

    /// Resume audio context (required after user gesture)
    fn resume(ctx: &AudioContext) {
        if ctx.state() == web_sys::AudioContextState::Suspended && ctx.resume().is_err() {
            log::warn!("AudioContext resume rejected");
        }
    }

    /// Play a sound effect. A cue that fails is retried once after a short
    /// delay, giving a suspended context time to resume.
    pub fn play(&self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        Self::resume(ctx);

        if Self::try_play(ctx, effect, self.sfx_volume).is_none() {
            log::warn!("Playing {:?} failed, retrying in {} ms", effect, RETRY_DELAY_MS);
            Self::schedule_retry(ctx.clone(), effect, self.sfx_volume);
        }
    }

    fn schedule_retry(ctx: AudioContext, effect: SoundEffect, vol: f32) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move || {
            Self::resume(&ctx);
            if Self::try_play(&ctx, effect, vol).is_none() {
                log::warn!("Retry of {:?} failed", effect);
            }
        });
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                RETRY_DELAY_MS,
            )
            .is_err()
        {
            log::warn!("Could not schedule retry of {:?}", effect);
        }
        closure.forget();
    }

    fn try_play(ctx: &AudioContext, effect: SoundEffect, vol: f32) -> Option<()> {
        match effect {
            SoundEffect::RoundStart => Self::play_round_start(ctx, vol),
            SoundEffect::Flap => Self::play_flap(ctx, vol),
            SoundEffect::Score => Self::play_score(ctx, vol),
            SoundEffect::Crash => Self::play_crash(ctx, vol),
            SoundEffect::Victory => Self::play_victory(ctx, vol),
        }
    }

    /// Start the background drone (restarts it if already running)
    pub fn start_drone(&mut self) {
        self.stop_drone();
        if self.music_volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        Self::resume(ctx);

        let drone = (|| {
            let gain = ctx.create_gain().ok()?;
            gain.gain().set_value(self.music_volume * 0.15);
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            let mut oscillators = Vec::with_capacity(2);
            for (freq, osc_type) in [(110.0, OscillatorType::Triangle), (164.8, OscillatorType::Sine)] {
                let osc = ctx.create_oscillator().ok()?;
                osc.set_type(osc_type);
                osc.frequency().set_value(freq);
                osc.connect_with_audio_node(&gain).ok()?;
                osc.start().ok()?;
                oscillators.push(osc);
            }
            Some(Drone { oscillators, gain })
        })();

        if drone.is_none() {
            log::warn!("Background drone unavailable");
        }
        self.drone = drone;
    }

    /// Stop the background drone
    pub fn stop_drone(&mut self) {
        if let Some(drone) = self.drone.take() {
            for osc in drone.oscillators {
                osc.stop().ok();
            }
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Round start - rising two-note chirp
    fn play_round_start(ctx: &AudioContext, vol: f32) -> Option<()> {
        for (i, freq) in [440.0, 660.0].iter().enumerate() {
            let (osc, gain) = Self::create_osc(ctx, *freq, OscillatorType::Triangle)?;
            let t = ctx.current_time() + i as f64 * 0.08;
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + 0.2).ok();
        }
        Some(())
    }

    /// Flap - short whoosh up
    fn play_flap(ctx: &AudioContext, vol: f32) -> Option<()> {
        let (osc, gain) = Self::create_osc(ctx, 400.0, OscillatorType::Sine)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(800.0, t + 0.08)
            .ok();

        osc.start().ok()?;
        osc.stop_with_when(t + 0.12).ok();
        Some(())
    }

    /// Score - happy ding
    fn play_score(ctx: &AudioContext, vol: f32) -> Option<()> {
        for (i, freq) in [520.0, 680.0].iter().enumerate() {
            let (osc, gain) = Self::create_osc(ctx, *freq, OscillatorType::Sine)?;
            let t = ctx.current_time() + i as f64 * 0.1;
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.15)
                .ok();
            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + 0.15).ok();
        }
        Some(())
    }

    /// Crash - thump, then sad descending notes
    fn play_crash(ctx: &AudioContext, vol: f32) -> Option<()> {
        let t = ctx.current_time();

        let (osc, gain) = Self::create_osc(ctx, 150.0, OscillatorType::Sawtooth)?;
        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(150.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(40.0, t + 0.3)
            .ok();
        osc.start().ok()?;
        osc.stop_with_when(t + 0.35).ok();

        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = 0.2 + i as f64 * 0.2;
            if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = t + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
        Some(())
    }

    /// Victory - celebratory fanfare
    fn play_victory(ctx: &AudioContext, vol: f32) -> Option<()> {
        // Short pause after the drone stops
        let start = ctx.current_time() + 0.1;
        for (i, freq) in [400.0, 500.0, 600.0, 800.0, 1000.0].iter().enumerate() {
            let (osc, gain) = Self::create_osc(ctx, *freq, OscillatorType::Triangle)?;
            let t = start + i as f64 * 0.1;
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.start_with_when(t).ok()?;
            osc.stop_with_when(t + 0.5).ok();
        }
        Some(())
    }
}

impl PhaseHooks for AudioManager {
    fn on_round_start(&mut self) {
        self.start_drone();
        self.play(SoundEffect::RoundStart);
    }

    fn on_flap(&mut self) {
        self.play(SoundEffect::Flap);
    }

    fn on_score(&mut self, _score: u32) {
        self.play(SoundEffect::Score);
    }

    fn on_ended(&mut self, _score: u32) {
        self.stop_drone();
        self.play(SoundEffect::Crash);
    }

    fn on_won(&mut self, _score: u32) {
        self.stop_drone();
        self.play(SoundEffect::Victory);
    }
}
