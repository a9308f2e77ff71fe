//! Boss projectiles
//!
//! Projectiles fly in a straight line; `kind` only changes speed and looks.
//! Positions are top-left corners in arena units, one velocity step per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Projectile flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectileKind {
    Laser,
    Missile,
    Fireball,
}

impl ProjectileKind {
    /// Hitbox size
    pub fn size(self) -> Vec2 {
        match self {
            ProjectileKind::Laser => Vec2::new(40.0, 6.0),
            ProjectileKind::Missile => Vec2::new(28.0, 12.0),
            ProjectileKind::Fireball => Vec2::new(20.0, 20.0),
        }
    }
}

/// Axis-aligned play area; anything fully outside it is gone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        }
    }
}

impl ArenaBounds {
    /// True if the rect at `pos` with `size` still overlaps the arena
    pub fn intersects(&self, pos: Vec2, size: Vec2) -> bool {
        pos.x + size.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y + size.y >= self.min.y
            && pos.y <= self.max.y
    }
}

/// A live boss projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossProjectile {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub kind: ProjectileKind,
    /// Ticks since spawn
    pub age_ticks: u32,
}

impl BossProjectile {
    pub fn new(id: u32, kind: ProjectileKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            size: kind.size(),
            vel,
            kind,
            age_ticks: 0,
        }
    }

    /// AABB overlap against a player hitbox
    pub fn overlaps(&self, pos: Vec2, size: Vec2) -> bool {
        self.pos.x < pos.x + size.x
            && self.pos.x + self.size.x > pos.x
            && self.pos.y < pos.y + size.y
            && self.pos.y + self.size.y > pos.y
    }
}

/// Advance every projectile one tick and drop the expired ones.
///
/// Returns the number of projectiles removed.
pub fn advance_projectiles(
    projectiles: &mut Vec<BossProjectile>,
    bounds: &ArenaBounds,
    max_lifetime_ticks: u32,
) -> usize {
    for p in projectiles.iter_mut() {
        p.pos += p.vel;
        p.age_ticks += 1;
    }
    let before = projectiles.len();
    projectiles.retain(|p| p.age_ticks <= max_lifetime_ticks && bounds.intersects(p.pos, p.size));
    before - projectiles.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laser_at(x: f32) -> BossProjectile {
        BossProjectile::new(1, ProjectileKind::Laser, Vec2::new(x, 300.0), Vec2::new(-10.0, 0.0))
    }

    #[test]
    fn test_straight_line_integration() {
        let mut list = vec![laser_at(500.0)];
        advance_projectiles(&mut list, &ArenaBounds::default(), 300);
        advance_projectiles(&mut list, &ArenaBounds::default(), 300);
        assert_eq!(list[0].pos, Vec2::new(480.0, 300.0));
        assert_eq!(list[0].age_ticks, 2);
    }

    #[test]
    fn test_leaves_arena() {
        // Laser is 40 wide: still partly visible at x = -35, gone at x = -45
        let mut list = vec![laser_at(-25.0)];
        assert_eq!(advance_projectiles(&mut list, &ArenaBounds::default(), 300), 0);
        assert_eq!(advance_projectiles(&mut list, &ArenaBounds::default(), 300), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn test_lifetime_expiry() {
        let mut slow = BossProjectile::new(
            2,
            ProjectileKind::Fireball,
            Vec2::new(400.0, 200.0),
            Vec2::ZERO,
        );
        slow.age_ticks = 9;
        let mut list = vec![slow];
        assert_eq!(advance_projectiles(&mut list, &ArenaBounds::default(), 10), 0);
        assert_eq!(advance_projectiles(&mut list, &ArenaBounds::default(), 10), 1);
    }

    #[test]
    fn test_overlap() {
        let p = laser_at(100.0);
        assert!(p.overlaps(Vec2::new(120.0, 290.0), Vec2::new(30.0, 30.0)));
        assert!(!p.overlaps(Vec2::new(120.0, 200.0), Vec2::new(30.0, 30.0)));
    }
}
