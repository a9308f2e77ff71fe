//! Difficulty and reward scaling
//!
//! Pure functions of (boss, sequence index, rush flag, endless wave).
//! Multipliers are kept in whole percent so every rounding step is exact
//! and replays agree bit for bit across platforms.

use serde::{Deserialize, Serialize};

use super::boss::BossType;
use crate::consts::MIN_ATTACK_INTERVAL;

/// Health/reward step per sequence index (+25% health, +50% rewards)
const HEALTH_INDEX_STEP_PCT: u64 = 25;
const REWARD_INDEX_STEP_PCT: u64 = 50;
/// Rush multipliers
const RUSH_HEALTH_PCT: u64 = 150;
const RUSH_ATTACK_SPEED_PCT: u64 = 120;
const RUSH_REWARD_PCT: u64 = 150;
/// Endless per-wave steps
const WAVE_HEALTH_STEP_PCT: u64 = 15;
const WAVE_ATTACK_SPEED_STEP_PCT: u64 = 5;
const WAVE_REWARD_STEP_PCT: u64 = 30;

/// A boss config after index/mode/wave multipliers, valid for one fight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledBossConfig {
    pub boss_type: BossType,
    pub health: u32,
    pub attack_interval: u32,
    pub reward: Reward,
}

/// Coin/XP payout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub coins: u64,
    pub xp: u64,
}

impl std::ops::AddAssign for Reward {
    fn add_assign(&mut self, rhs: Self) {
        self.coins = self.coins.saturating_add(rhs.coins);
        self.xp = self.xp.saturating_add(rhs.xp);
    }
}

#[inline]
fn step_pct(step: u64, n: u32) -> u64 {
    100 + step * n as u64
}

/// Whole units out of a scaled product, pinned at `u32::MAX`
#[inline]
fn ceil_units(scaled: u64) -> u32 {
    u32::try_from(scaled.div_ceil(PCT3_ONE)).unwrap_or(u32::MAX)
}

/// Product of three percentages, as a fraction over 100^3 (saturating)
#[inline]
fn pct3(a: u64, b: u64, c: u64) -> u64 {
    a.saturating_mul(b).saturating_mul(c)
}

const PCT3_ONE: u64 = 100 * 100 * 100;

/// Scaled boss health: ceil(base * (1 + 0.25i) * rush(1.5) * (1 + 0.15w))
pub fn scaled_health(boss: BossType, index: u32, rush: bool, wave: u32) -> u32 {
    let base = boss.config().health as u64;
    let mult = pct3(
        step_pct(HEALTH_INDEX_STEP_PCT, index),
        if rush { RUSH_HEALTH_PCT } else { 100 },
        step_pct(WAVE_HEALTH_STEP_PCT, wave),
    );
    ceil_units(base.saturating_mul(mult))
}

/// Scaled attack interval: floor(base / ((1 + 0.25i) * rush(1.2) * (1 + 0.05w))), at least 20
pub fn scaled_attack_interval(boss: BossType, index: u32, rush: bool, wave: u32) -> u32 {
    let base = boss.config().attack_interval as u64;
    let speed = pct3(
        step_pct(HEALTH_INDEX_STEP_PCT, index),
        if rush { RUSH_ATTACK_SPEED_PCT } else { 100 },
        step_pct(WAVE_ATTACK_SPEED_STEP_PCT, wave),
    );
    let interval = (base * PCT3_ONE / speed) as u32;
    interval.max(MIN_ATTACK_INTERVAL)
}

/// Coin/XP payout for the boss at `index`: floor(base * (1 + 0.5i) * rush(1.5) * (1 + 0.3w))
///
/// Kept apart from [`scale`] so reward tuning never touches combat balance.
pub fn reward(boss: BossType, index: u32, rush: bool, wave: u32) -> Reward {
    let cfg = boss.config();
    let mult = pct3(
        step_pct(REWARD_INDEX_STEP_PCT, index),
        if rush { RUSH_REWARD_PCT } else { 100 },
        step_pct(WAVE_REWARD_STEP_PCT, wave),
    );
    Reward {
        coins: (cfg.reward_coins as u64).saturating_mul(mult) / PCT3_ONE,
        xp: (cfg.reward_xp as u64).saturating_mul(mult) / PCT3_ONE,
    }
}

/// Derive the scaled config for one fight
pub fn scale(boss: BossType, index: u32, rush: bool, wave: u32) -> ScaledBossConfig {
    ScaledBossConfig {
        boss_type: boss,
        health: scaled_health(boss, index, rush, wave),
        attack_interval: scaled_attack_interval(boss, index, rush, wave),
        reward: reward(boss, index, rush, wave),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOSSES: [BossType; 3] = [BossType::Mech, BossType::Dragon, BossType::Titan];

    #[test]
    fn test_mech_story_base_values() {
        let cfg = scale(BossType::Mech, 0, false, 0);
        assert_eq!(cfg.health, 4);
        assert_eq!(cfg.attack_interval, 150);
        assert_eq!(cfg.reward, Reward { coins: 100, xp: 200 });
    }

    #[test]
    fn test_titan_rush_third_boss() {
        let cfg = scale(BossType::Titan, 2, true, 0);
        // ceil(10 * 1.5 * 1.5) = ceil(22.5)
        assert_eq!(cfg.health, 23);
        // floor(90 / (1.5 * 1.2))
        assert_eq!(cfg.attack_interval, 50);
        // floor(500 * 2.0 * 1.5)
        assert_eq!(cfg.reward.coins, 1500);
        assert_eq!(cfg.reward.xp, 3000);
    }

    #[test]
    fn test_endless_dragon_wave_three() {
        let cfg = scale(BossType::Dragon, 1, false, 3);
        // ceil(6 * 1.25 * 1.45) = ceil(10.875)
        assert_eq!(cfg.health, 11);
        // floor(120 / (1.25 * 1.15)) = floor(83.47...)
        assert_eq!(cfg.attack_interval, 83);
        // floor(250 * 1.5 * 1.9) = floor(712.5)
        assert_eq!(cfg.reward.coins, 712);
    }

    #[test]
    fn test_attack_interval_floor() {
        // Deep endless waves would drop far below the floor
        assert_eq!(scaled_attack_interval(BossType::Titan, 2, true, 200), MIN_ATTACK_INTERVAL);
    }

    #[test]
    fn test_exact_integer_products_do_not_round_up() {
        // 4 * 1.5 = 6 exactly; a float product could land on 6.0000001
        assert_eq!(scaled_health(BossType::Mech, 2, false, 0), 6);
        assert_eq!(scaled_health(BossType::Mech, 0, true, 0), 6);
    }

    #[test]
    fn test_extreme_waves_saturate() {
        assert_eq!(scaled_health(BossType::Titan, u32::MAX, true, u32::MAX), u32::MAX);
        assert_eq!(
            scaled_attack_interval(BossType::Mech, u32::MAX, true, u32::MAX),
            MIN_ATTACK_INTERVAL
        );
        let r = reward(BossType::Titan, u32::MAX, true, u32::MAX);
        assert!(r.coins >= reward(BossType::Titan, 2, true, 1_000_000).coins);
        // Large but finite waves still grow
        assert!(
            scaled_health(BossType::Mech, 0, false, 40_000_000)
                > scaled_health(BossType::Mech, 0, false, 1_000_000)
        );
    }

    #[test]
    fn test_reward_accumulates() {
        let mut total = Reward::default();
        total += reward(BossType::Mech, 0, false, 0);
        total += reward(BossType::Dragon, 1, false, 0);
        assert_eq!(total.coins, 100 + 375);
        assert_eq!(total.xp, 200 + 750);
    }

    proptest! {
        #[test]
        fn health_positive_and_monotonic(b in 0usize..3, index in 0u32..=5, wave in 0u32..=5, rush in any::<bool>()) {
            let boss = BOSSES[b];
            let h = scaled_health(boss, index, rush, wave);
            prop_assert!(h > 0);
            prop_assert!(scaled_health(boss, index + 1, rush, wave) >= h);
            prop_assert!(scaled_health(boss, index, rush, wave + 1) >= h);
            prop_assert!(scaled_health(boss, index, true, wave) >= scaled_health(boss, index, false, wave));
        }

        #[test]
        fn attack_interval_bounded_and_non_increasing(b in 0usize..3, index in 0u32..=5, wave in 0u32..=5, rush in any::<bool>()) {
            let boss = BOSSES[b];
            let i = scaled_attack_interval(boss, index, rush, wave);
            prop_assert!(i >= MIN_ATTACK_INTERVAL);
            prop_assert!(scaled_attack_interval(boss, index + 1, rush, wave) <= i);
            prop_assert!(scaled_attack_interval(boss, index, rush, wave + 1) <= i);
            prop_assert!(scaled_attack_interval(boss, index, true, wave) <= scaled_attack_interval(boss, index, false, wave));
        }

        #[test]
        fn rewards_monotonic(b in 0usize..3, index in 0u32..=5, wave in 0u32..=5, rush in any::<bool>()) {
            let boss = BOSSES[b];
            let r = reward(boss, index, rush, wave);
            let next_index = reward(boss, index + 1, rush, wave);
            let next_wave = reward(boss, index, rush, wave + 1);
            prop_assert!(next_index.coins >= r.coins && next_index.xp >= r.xp);
            prop_assert!(next_wave.coins >= r.coins && next_wave.xp >= r.xp);
        }

        #[test]
        fn scale_matches_parts(b in 0usize..3, index in 0u32..=5, wave in 0u32..=5, rush in any::<bool>()) {
            let boss = BOSSES[b];
            let cfg = scale(boss, index, rush, wave);
            prop_assert_eq!(cfg.reward, reward(boss, index, rush, wave));
            prop_assert_eq!(cfg.boss_type, boss);
        }
    }
}
