//! Observational arena events
//!
//! Pushed during a tick and drained by the caller for UI and audio. Nothing
//! in the simulation reads them back.

use serde::{Deserialize, Serialize};

use super::boss::BossType;
use super::mode::GameMode;
use super::scaling::Reward;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArenaEvent {
    ArenaEntered {
        mode: GameMode,
        distance: f32,
    },
    BossSpawned {
        boss_type: BossType,
        index: u32,
        wave: u32,
        max_health: u32,
    },
    BossAttack {
        boss_type: BossType,
        projectiles: u32,
    },
    BossHealthChanged {
        health: u32,
        max_health: u32,
    },
    BossPhaseChanged {
        phase: u8,
    },
    BossDefeated {
        boss_type: BossType,
        kill_time_seconds: f64,
        distance: f32,
        reward: Reward,
    },
    BreakStarted {
        ticks: u32,
    },
    /// Endless mode rolled over into a new wave. The first boss of the wave
    /// is already spawned.
    WaveStarted {
        wave: u32,
        /// Nominal run distance of the wave, for display only
        trigger_distance: f32,
    },
    ArenaComplete {
        total_rewards: Reward,
        bosses_defeated: usize,
    },
    /// Player died inside the arena; terminal for this run
    ArenaFailed {
        total_rewards: Reward,
        bosses_defeated: usize,
    },
}
