//! Live combat for a single boss
//!
//! The engine owns one boss from spawn to defeat. It never outlives the fight:
//! the arena drops it once the defeat has been collected.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::BossType;
use super::error::{ArenaError, ArenaResult};
use super::projectile::{BossProjectile, ProjectileKind, advance_projectiles};
use super::scaling::ScaledBossConfig;
use crate::consts::*;
use crate::tuning::ArenaTuning;

/// Height above the ground of the "air" projectile lane
const AIR_LANE_HEIGHT: f32 = 90.0;
/// Horizontal spacing between projectiles of one volley
const VOLLEY_SPACING: f32 = 70.0;

/// Combat lifecycle of one boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatState {
    Active,
    /// Terminal
    Defeated,
}

/// A live boss instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: u32,
    pub boss_type: BossType,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    /// Fixed at spawn
    pub max_health: u32,
    pub phase: u8,
    /// Counts down to the next attack
    pub attack_timer: u32,
    pub is_attacking: bool,
    pub projectiles: Vec<BossProjectile>,
}

impl Boss {
    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }
}

/// Result of one `apply_damage` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    pub health: u32,
    pub max_health: u32,
    /// New phase, if this hit crossed a threshold
    pub phase_changed: Option<u8>,
    pub defeated: bool,
}

/// Handed out exactly once per boss, after health reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefeatReport {
    pub boss_type: BossType,
    /// Ticks between spawn and the killing blow
    pub kill_ticks: u64,
}

/// What happened during one combat tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatTick {
    /// Projectiles fired this tick (0 if no attack)
    pub fired: u32,
    pub expired: usize,
}

pub struct BossCombatEngine {
    boss: Boss,
    config: ScaledBossConfig,
    state: CombatState,
    rng: Pcg32,
    ticks_alive: u64,
    display_ticks: u32,
    next_projectile_id: u32,
    pending_defeat: Option<DefeatReport>,
}

impl BossCombatEngine {
    /// Spawn a boss from its scaled config; the engine starts Active
    pub fn spawn(config: ScaledBossConfig, id: u32, seed: u64) -> Self {
        let base = config.boss_type.config();
        let size = Vec2::new(base.width, base.height);
        let pos = Vec2::new(
            ARENA_WIDTH - BOSS_MARGIN_X - size.x,
            ARENA_GROUND_Y - size.y,
        );
        let boss = Boss {
            id,
            boss_type: config.boss_type,
            pos,
            size,
            health: config.health,
            max_health: config.health,
            phase: 0,
            attack_timer: config.attack_interval,
            is_attacking: false,
            projectiles: Vec::new(),
        };
        log::info!(
            "Spawned {} (hp {}, attack every {} ticks)",
            base.name,
            config.health,
            config.attack_interval
        );
        Self {
            boss,
            config,
            state: CombatState::Active,
            rng: Pcg32::seed_from_u64(seed),
            ticks_alive: 0,
            display_ticks: 0,
            next_projectile_id: 1,
            pending_defeat: None,
        }
    }

    pub fn boss(&self) -> &Boss {
        &self.boss
    }

    pub fn config(&self) -> &ScaledBossConfig {
        &self.config
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == CombatState::Active
    }

    /// Advance one tick: attack timer, attack display window, projectiles
    pub fn tick(&mut self, tuning: &ArenaTuning) -> ArenaResult<CombatTick> {
        if self.state == CombatState::Defeated {
            return Err(ArenaError::BossAlreadyDefeated);
        }
        self.ticks_alive += 1;

        if self.display_ticks > 0 {
            self.display_ticks -= 1;
            if self.display_ticks == 0 {
                self.boss.is_attacking = false;
            }
        }

        let expired = advance_projectiles(
            &mut self.boss.projectiles,
            &tuning.bounds,
            tuning.projectile_lifetime_ticks,
        );

        let mut fired = 0;
        self.boss.attack_timer = self.boss.attack_timer.saturating_sub(1);
        if self.boss.attack_timer == 0 {
            fired = self.fire_attack(tuning);
            self.boss.attack_timer = self.config.attack_interval;
        }

        Ok(CombatTick { fired, expired })
    }

    /// Launch a volley; later phases fire more projectiles
    fn fire_attack(&mut self, tuning: &ArenaTuning) -> u32 {
        let kind = projectile_kind(self.boss.boss_type);
        let speed = tuning.projectile_speeds.for_kind(kind);
        let size = kind.size();
        let count = (1 + self.boss.phase as u32).min(tuning.max_projectiles_per_attack);

        for i in 0..count {
            let air = self.rng.random_bool(0.5);
            let y = if air {
                ARENA_GROUND_Y - AIR_LANE_HEIGHT - size.y
            } else {
                ARENA_GROUND_Y - size.y - 4.0
            };
            let x = self.boss.pos.x - size.x + i as f32 * VOLLEY_SPACING;
            let id = self.next_projectile_id;
            self.next_projectile_id += 1;
            self.boss.projectiles.push(BossProjectile::new(
                id,
                kind,
                Vec2::new(x, y),
                Vec2::new(-speed, 0.0),
            ));
        }

        self.boss.is_attacking = true;
        self.display_ticks = tuning.attack_display_ticks;
        log::debug!(
            "{} fired {} x {:?} (phase {})",
            self.boss.boss_type,
            count,
            kind,
            self.boss.phase
        );
        count
    }

    /// Apply player damage. Rejected once the boss is defeated.
    pub fn apply_damage(&mut self, amount: u32, tuning: &ArenaTuning) -> ArenaResult<DamageOutcome> {
        if self.state == CombatState::Defeated {
            return Err(ArenaError::BossAlreadyDefeated);
        }

        self.boss.health = self.boss.health.saturating_sub(amount);
        let phase = tuning.phase_for(self.boss.health, self.boss.max_health, self.boss.phase);
        let phase_changed = (phase != self.boss.phase).then_some(phase);
        self.boss.phase = phase;

        let defeated = self.boss.health == 0;
        if defeated {
            self.state = CombatState::Defeated;
            self.boss.is_attacking = false;
            self.boss.projectiles.clear();
            self.pending_defeat = Some(DefeatReport {
                boss_type: self.boss.boss_type,
                kill_ticks: self.ticks_alive,
            });
        }

        Ok(DamageOutcome {
            health: self.boss.health,
            max_health: self.boss.max_health,
            phase_changed,
            defeated,
        })
    }

    /// Collect the defeat report. Returns `Some` exactly once per boss.
    pub fn take_defeat(&mut self) -> Option<DefeatReport> {
        self.pending_defeat.take()
    }
}

fn projectile_kind(boss: BossType) -> ProjectileKind {
    match boss {
        BossType::Mech => ProjectileKind::Laser,
        BossType::Dragon => ProjectileKind::Fireball,
        BossType::Titan => ProjectileKind::Missile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scaling::scale;

    fn mech() -> BossCombatEngine {
        BossCombatEngine::spawn(scale(BossType::Mech, 0, false, 0), 1, 7)
    }

    #[test]
    fn test_spawn_initial_state() {
        let engine = mech();
        let boss = engine.boss();
        assert_eq!(boss.health, 4);
        assert_eq!(boss.max_health, 4);
        assert_eq!(boss.phase, 0);
        assert_eq!(boss.attack_timer, 150);
        assert!(boss.projectiles.is_empty());
        assert!(engine.is_active());
    }

    #[test]
    fn test_attack_fires_on_interval() {
        let tuning = ArenaTuning::default();
        let mut engine = mech();
        for _ in 0..149 {
            assert_eq!(engine.tick(&tuning).unwrap().fired, 0);
        }
        let t = engine.tick(&tuning).unwrap();
        assert_eq!(t.fired, 1);
        assert!(engine.boss().is_attacking);
        assert_eq!(engine.boss().attack_timer, 150);
        assert_eq!(engine.boss().projectiles.len(), 1);
        assert_eq!(engine.boss().projectiles[0].kind, ProjectileKind::Laser);
    }

    #[test]
    fn test_attack_display_window_closes() {
        let tuning = ArenaTuning::default();
        let mut engine = mech();
        for _ in 0..150 {
            engine.tick(&tuning).unwrap();
        }
        assert!(engine.boss().is_attacking);
        for _ in 0..ATTACK_DISPLAY_TICKS {
            engine.tick(&tuning).unwrap();
        }
        assert!(!engine.boss().is_attacking);
    }

    #[test]
    fn test_projectiles_leave_arena() {
        let tuning = ArenaTuning::default();
        let mut engine = mech();
        for _ in 0..150 {
            engine.tick(&tuning).unwrap();
        }
        // Laser at 9 units/tick crosses the 800-wide arena well within 149 ticks
        let mut expired = 0;
        for _ in 0..149 {
            expired += engine.tick(&tuning).unwrap().expired;
        }
        assert_eq!(expired, 1);
        assert!(engine.boss().projectiles.is_empty());
    }

    #[test]
    fn test_damage_and_phases() {
        let tuning = ArenaTuning::default();
        let mut engine = mech();

        let hit = engine.apply_damage(1, &tuning).unwrap();
        assert_eq!(hit.health, 3);
        assert_eq!(hit.phase_changed, None);

        let hit = engine.apply_damage(1, &tuning).unwrap();
        assert_eq!(hit.phase_changed, Some(1));

        let hit = engine.apply_damage(1, &tuning).unwrap();
        assert_eq!(hit.phase_changed, Some(2));
        assert!(!hit.defeated);
    }

    #[test]
    fn test_later_phase_fires_more() {
        let tuning = ArenaTuning::default();
        let mut engine = mech();
        engine.apply_damage(3, &tuning).unwrap();
        assert_eq!(engine.boss().phase, 2);
        for _ in 0..149 {
            engine.tick(&tuning).unwrap();
        }
        assert_eq!(engine.tick(&tuning).unwrap().fired, 3);
    }

    #[test]
    fn test_defeat_reported_once() {
        let tuning = ArenaTuning::default();
        let mut engine = mech();
        engine.tick(&tuning).unwrap();
        let hit = engine.apply_damage(10, &tuning).unwrap();
        assert!(hit.defeated);
        assert_eq!(hit.health, 0);
        assert_eq!(engine.state(), CombatState::Defeated);

        let report = engine.take_defeat().unwrap();
        assert_eq!(report.boss_type, BossType::Mech);
        assert_eq!(report.kill_ticks, 1);
        assert!(engine.take_defeat().is_none());
    }

    #[test]
    fn test_rejects_after_defeat() {
        let tuning = ArenaTuning::default();
        let mut engine = mech();
        engine.apply_damage(4, &tuning).unwrap();
        assert_eq!(
            engine.apply_damage(1, &tuning),
            Err(ArenaError::BossAlreadyDefeated)
        );
        assert_eq!(engine.tick(&tuning), Err(ArenaError::BossAlreadyDefeated));
        assert_eq!(engine.boss().health, 0);
    }

    #[test]
    fn test_same_seed_same_volley() {
        let tuning = ArenaTuning::default();
        let mut a = mech();
        let mut b = mech();
        a.apply_damage(3, &tuning).unwrap();
        b.apply_damage(3, &tuning).unwrap();
        for _ in 0..150 {
            a.tick(&tuning).unwrap();
            b.tick(&tuning).unwrap();
        }
        assert_eq!(a.boss().projectiles, b.boss().projectiles);
    }
}
