//! Data-driven combat balance
//!
//! Scaling formulas live in `sim::scaling`; everything here is a knob a
//! designer may want to change without touching code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::projectile::{ArenaBounds, ProjectileKind};

/// Invalid balance data
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("phase threshold ratio {0} is outside (0, 1)")]
    RatioOutOfRange(f32),
    #[error("phase thresholds must have falling ratios and rising phases")]
    UnorderedThresholds,
    #[error("at least one projectile per attack is required")]
    NoProjectiles,
}

/// Boss enters `phase` once health / max_health drops to `health_ratio` or below
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseThreshold {
    pub health_ratio: f32,
    pub phase: u8,
}

/// Straight-line speed per projectile kind (units per tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSpeeds {
    pub laser: f32,
    pub missile: f32,
    pub fireball: f32,
}

impl ProjectileSpeeds {
    pub fn for_kind(&self, kind: ProjectileKind) -> f32 {
        match kind {
            ProjectileKind::Laser => self.laser,
            ProjectileKind::Missile => self.missile,
            ProjectileKind::Fireball => self.fireball,
        }
    }
}

/// Combat tuning for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaTuning {
    /// Ordered by falling health ratio
    pub phase_thresholds: Vec<PhaseThreshold>,
    /// Story-mode pause between bosses
    pub break_duration_ticks: u32,
    pub attack_display_ticks: u32,
    pub projectile_lifetime_ticks: u32,
    /// Cap on `1 + phase` projectiles per attack
    pub max_projectiles_per_attack: u32,
    pub projectile_speeds: ProjectileSpeeds,
    pub bounds: ArenaBounds,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            phase_thresholds: vec![
                PhaseThreshold {
                    health_ratio: 0.66,
                    phase: 1,
                },
                PhaseThreshold {
                    health_ratio: 0.33,
                    phase: 2,
                },
            ],
            break_duration_ticks: BREAK_DURATION_TICKS,
            attack_display_ticks: ATTACK_DISPLAY_TICKS,
            projectile_lifetime_ticks: PROJECTILE_MAX_LIFETIME_TICKS,
            max_projectiles_per_attack: 3,
            projectile_speeds: ProjectileSpeeds {
                laser: 9.0,
                missile: 6.0,
                fireball: 5.0,
            },
            bounds: ArenaBounds::default(),
        }
    }
}

impl ArenaTuning {
    /// Parse and validate tuning JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        for t in &self.phase_thresholds {
            if !(t.health_ratio > 0.0 && t.health_ratio < 1.0) {
                return Err(TuningError::RatioOutOfRange(t.health_ratio));
            }
        }
        let ordered = self
            .phase_thresholds
            .windows(2)
            .all(|w| w[0].health_ratio > w[1].health_ratio && w[0].phase < w[1].phase);
        if !ordered {
            return Err(TuningError::UnorderedThresholds);
        }
        if self.max_projectiles_per_attack == 0 {
            return Err(TuningError::NoProjectiles);
        }
        Ok(())
    }

    /// Phase for the given health, never below `current`
    pub fn phase_for(&self, health: u32, max_health: u32, current: u8) -> u8 {
        if max_health == 0 {
            return current;
        }
        let ratio = health as f32 / max_health as f32;
        self.phase_thresholds
            .iter()
            .filter(|t| ratio <= t.health_ratio)
            .map(|t| t.phase)
            .max()
            .unwrap_or(0)
            .max(current)
    }
}
