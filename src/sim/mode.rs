//! Play mode selection
//!
//! Pure lookups: which trigger distance, which multipliers, whether breaks run
//! and what happens when the three-boss sequence runs out.

use serde::{Deserialize, Serialize};

use super::boss::{BOSS_SEQUENCE, BossType};

/// Play mode of the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Story,
    Rush,
    Endless,
}

/// What happens after the last boss of the sequence falls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceEnd {
    Complete,
    NextWave,
}

/// Rules a mode applies to the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeProfile {
    pub breaks_enabled: bool,
    /// Rush health/attack/reward multipliers
    pub rush_multiplier: bool,
    /// Endless per-wave multipliers
    pub wave_scaling: bool,
    pub sequence_end: SequenceEnd,
}

impl GameMode {
    pub fn profile(self) -> ModeProfile {
        match self {
            GameMode::Story => ModeProfile {
                breaks_enabled: true,
                rush_multiplier: false,
                wave_scaling: false,
                sequence_end: SequenceEnd::Complete,
            },
            GameMode::Rush => ModeProfile {
                breaks_enabled: false,
                rush_multiplier: true,
                wave_scaling: false,
                sequence_end: SequenceEnd::Complete,
            },
            GameMode::Endless => ModeProfile {
                breaks_enabled: false,
                rush_multiplier: false,
                wave_scaling: true,
                sequence_end: SequenceEnd::NextWave,
            },
        }
    }

    pub fn is_rush(self) -> bool {
        self == GameMode::Rush
    }

    pub fn is_endless(self) -> bool {
        self == GameMode::Endless
    }

    /// Rush and endless results go to the leaderboard
    pub fn submits_completion(self) -> bool {
        matches!(self, GameMode::Rush | GameMode::Endless)
    }

    /// Run distance at which the arena (or an endless wave) is due.
    ///
    /// Rush is entered from the menu, so it triggers immediately. Endless
    /// waves after the first are spaced one full sequence apart, counted from
    /// where the arena was entered.
    pub fn trigger_distance(self, wave: u32, arena_start_distance: f32) -> f32 {
        let first = BOSS_SEQUENCE[0].config().trigger_distance;
        match self {
            GameMode::Story => first,
            GameMode::Rush => 0.0,
            GameMode::Endless if wave == 0 => first,
            GameMode::Endless => arena_start_distance + wave as f32 * sequence_span(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Story => "story",
            GameMode::Rush => "rush",
            GameMode::Endless => "endless",
        }
    }
}

/// Distance covered by one pass through the sequence
fn sequence_span() -> f32 {
    let last: BossType = BOSS_SEQUENCE[BOSS_SEQUENCE.len() - 1];
    last.config().trigger_distance
}
