//! Boss archetypes and their base configuration
//!
//! Base configs are immutable. Every fight works on a scaled copy produced by
//! [`super::scaling::scale`].

use serde::{Deserialize, Serialize};

/// Boss archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BossType {
    Mech,
    Dragon,
    Titan,
}

/// Fixed fight order, shared by every mode
pub const BOSS_SEQUENCE: [BossType; 3] = [BossType::Mech, BossType::Dragon, BossType::Titan];

/// Base (unscaled) boss configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BossConfig {
    pub name: &'static str,
    /// Run distance at which this boss is due in story mode
    pub trigger_distance: f32,
    pub health: u32,
    pub width: f32,
    pub height: f32,
    pub color: &'static str,
    /// Ticks between attacks before scaling
    pub attack_interval: u32,
    pub reward_coins: u32,
    pub reward_xp: u32,
}

const MECH: BossConfig = BossConfig {
    name: "Mech Walker",
    trigger_distance: 1000.0,
    health: 4,
    width: 90.0,
    height: 110.0,
    color: "#64748b",
    attack_interval: 150,
    reward_coins: 100,
    reward_xp: 200,
};

const DRAGON: BossConfig = BossConfig {
    name: "Ember Dragon",
    trigger_distance: 2000.0,
    health: 6,
    width: 130.0,
    height: 100.0,
    color: "#dc2626",
    attack_interval: 120,
    reward_coins: 250,
    reward_xp: 500,
};

const TITAN: BossConfig = BossConfig {
    name: "Stone Titan",
    trigger_distance: 3000.0,
    health: 10,
    width: 140.0,
    height: 160.0,
    color: "#78716c",
    attack_interval: 90,
    reward_coins: 500,
    reward_xp: 1000,
};

impl BossType {
    /// Base configuration for this archetype
    pub fn config(self) -> &'static BossConfig {
        match self {
            BossType::Mech => &MECH,
            BossType::Dragon => &DRAGON,
            BossType::Titan => &TITAN,
        }
    }

    /// Boss at a position in the fixed sequence (wraps every three bosses)
    pub fn at_index(index: u32) -> Self {
        BOSS_SEQUENCE[index as usize % BOSS_SEQUENCE.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BossType::Mech => "mech",
            BossType::Dragon => "dragon",
            BossType::Titan => "titan",
        }
    }
}

impl std::fmt::Display for BossType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_order() {
        assert_eq!(BossType::at_index(0), BossType::Mech);
        assert_eq!(BossType::at_index(1), BossType::Dragon);
        assert_eq!(BossType::at_index(2), BossType::Titan);
        assert_eq!(BossType::at_index(3), BossType::Mech);
    }

    #[test]
    fn test_trigger_distances_follow_sequence() {
        let distances: Vec<f32> = BOSS_SEQUENCE
            .iter()
            .map(|b| b.config().trigger_distance)
            .collect();
        assert!(distances.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&BossType::Dragon).unwrap();
        assert_eq!(json, "\"dragon\"");
    }
}
