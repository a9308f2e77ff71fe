//! Audio and haptic cues for arena events
//!
//! Cue selection is plain data and works everywhere. Playback uses
//! procedurally generated Web Audio tones (no sound files) and the
//! Vibration API, so it only exists on wasm.

use crate::sim::{ArenaEvent, BossType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Arena entered, boss music sting
    ArenaAlarm,
    /// Boss appears
    BossRoar,
    /// Laser volley (mech)
    LaserCharge,
    /// Fireball volley (dragon)
    FireBreath,
    /// Missile volley (titan)
    MissileLaunch,
    /// Player hit the boss
    BossHit,
    /// Boss entered a harder phase
    PhaseShift,
    /// Boss defeated
    BossExplode,
    /// Endless wave rolled over
    WaveUp,
    /// All bosses down
    Victory,
    /// Died in the arena
    Defeat,
}

impl SoundEffect {
    /// Sound for an arena event, if it has one
    pub fn for_event(event: &ArenaEvent) -> Option<Self> {
        match event {
            ArenaEvent::ArenaEntered { .. } => Some(SoundEffect::ArenaAlarm),
            ArenaEvent::BossSpawned { .. } => Some(SoundEffect::BossRoar),
            ArenaEvent::BossAttack { boss_type, .. } => Some(match boss_type {
                BossType::Mech => SoundEffect::LaserCharge,
                BossType::Dragon => SoundEffect::FireBreath,
                BossType::Titan => SoundEffect::MissileLaunch,
            }),
            // Defeat has its own sound
            ArenaEvent::BossHealthChanged { health: 0, .. } => None,
            ArenaEvent::BossHealthChanged { .. } => Some(SoundEffect::BossHit),
            ArenaEvent::BossPhaseChanged { .. } => Some(SoundEffect::PhaseShift),
            ArenaEvent::BossDefeated { .. } => Some(SoundEffect::BossExplode),
            ArenaEvent::WaveStarted { .. } => Some(SoundEffect::WaveUp),
            ArenaEvent::ArenaComplete { .. } => Some(SoundEffect::Victory),
            ArenaEvent::ArenaFailed { .. } => Some(SoundEffect::Defeat),
            ArenaEvent::BreakStarted { .. } => None,
        }
    }
}

/// Vibration patterns (mobile)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    Tap,
    Thud,
    Rumble,
}

impl Haptic {
    pub fn for_event(event: &ArenaEvent) -> Option<Self> {
        match event {
            ArenaEvent::BossHealthChanged { .. } => Some(Haptic::Tap),
            ArenaEvent::BossPhaseChanged { .. } => Some(Haptic::Thud),
            ArenaEvent::BossDefeated { .. } | ArenaEvent::ArenaFailed { .. } => {
                Some(Haptic::Rumble)
            }
            _ => None,
        }
    }

    pub fn duration_ms(self) -> u32 {
        match self {
            Haptic::Tap => 15,
            Haptic::Thud => 60,
            Haptic::Rumble => 250,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Haptic, SoundEffect};
    use crate::Settings;
    use crate::sim::ArenaEvent;

    /// Audio manager for the arena
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        haptics: bool,
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
                volume: settings.effective_sfx_volume(),
                haptics: settings.effective_haptics(),
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_volume();
            self.haptics = settings.effective_haptics();
        }

        /// Fire the cues for one arena event
        pub fn handle(&self, event: &ArenaEvent) {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.play(effect);
            }
            if self.haptics {
                if let Some(h) = Haptic::for_event(event) {
                    if let Some(window) = web_sys::window() {
                        let _ = window.navigator().vibrate_with_duration(h.duration_ms());
                    }
                }
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::ArenaAlarm => {
                    self.sweep(ctx, 440.0, 880.0, 0.4, vol * 0.3, OscillatorType::Square)
                }
                SoundEffect::BossRoar => {
                    self.sweep(ctx, 120.0, 50.0, 0.6, vol * 0.5, OscillatorType::Sawtooth)
                }
                SoundEffect::LaserCharge => {
                    self.sweep(ctx, 300.0, 1800.0, 0.25, vol * 0.25, OscillatorType::Square)
                }
                SoundEffect::FireBreath => {
                    self.sweep(ctx, 200.0, 60.0, 0.35, vol * 0.35, OscillatorType::Sawtooth)
                }
                SoundEffect::MissileLaunch => {
                    self.sweep(ctx, 90.0, 400.0, 0.3, vol * 0.35, OscillatorType::Triangle)
                }
                SoundEffect::BossHit => {
                    self.sweep(ctx, 150.0, 60.0, 0.1, vol * 0.6, OscillatorType::Sine)
                }
                SoundEffect::PhaseShift => {
                    self.sweep(ctx, 80.0, 40.0, 0.5, vol * 0.5, OscillatorType::Square)
                }
                SoundEffect::BossExplode => {
                    self.sweep(ctx, 100.0, 30.0, 0.6, vol * 0.6, OscillatorType::Sawtooth);
                    self.sweep(ctx, 1500.0, 200.0, 0.15, vol * 0.2, OscillatorType::Square);
                }
                SoundEffect::WaveUp => {
                    self.sweep(ctx, 523.0, 1047.0, 0.3, vol * 0.3, OscillatorType::Triangle)
                }
                SoundEffect::Victory => self.arpeggio(ctx, &[523.0, 659.0, 784.0, 1047.0], vol),
                SoundEffect::Defeat => self.arpeggio(ctx, &[392.0, 330.0, 262.0, 196.0], vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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

        /// Single tone gliding from `from` to `to` Hz
        fn sweep(
            &self,
            ctx: &AudioContext,
            from: f32,
            to: f32,
            secs: f64,
            vol: f32,
            osc_type: OscillatorType,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + secs)
                .ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + secs)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + secs + 0.05).ok();
        }

        /// Short note sequence
        fn arpeggio(&self, ctx: &AudioContext, notes: &[f32], vol: f32) {
            let t = ctx.current_time();
            for (i, &freq) in notes.iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle)
                else {
                    continue;
                };
                let start = t + i as f64 * 0.12;
                gain.gain().set_value_at_time(0.0, t).ok();
                gain.gain().set_value_at_time(vol * 0.3, start).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, start + 0.25)
                    .ok();
                osc.start_with_when(start).ok();
                osc.stop_with_when(start + 0.3).ok();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Reward;

    #[test]
    fn test_attack_sound_per_boss() {
        let laser = ArenaEvent::BossAttack {
            boss_type: BossType::Mech,
            projectiles: 1,
        };
        let missile = ArenaEvent::BossAttack {
            boss_type: BossType::Titan,
            projectiles: 2,
        };
        assert_eq!(SoundEffect::for_event(&laser), Some(SoundEffect::LaserCharge));
        assert_eq!(SoundEffect::for_event(&missile), Some(SoundEffect::MissileLaunch));
    }

    #[test]
    fn test_killing_blow_only_plays_explosion() {
        let hit = ArenaEvent::BossHealthChanged {
            health: 0,
            max_health: 4,
        };
        assert_eq!(SoundEffect::for_event(&hit), None);
        let defeated = ArenaEvent::BossDefeated {
            boss_type: BossType::Mech,
            kill_time_seconds: 3.0,
            distance: 1200.0,
            reward: Reward::default(),
        };
        assert_eq!(SoundEffect::for_event(&defeated), Some(SoundEffect::BossExplode));
        assert_eq!(Haptic::for_event(&defeated), Some(Haptic::Rumble));
    }

    #[test]
    fn test_breaks_are_silent() {
        let event = ArenaEvent::BreakStarted { ticks: 180 };
        assert_eq!(SoundEffect::for_event(&event), None);
        assert_eq!(Haptic::for_event(&event), None);
    }
}
