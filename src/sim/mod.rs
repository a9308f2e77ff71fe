//! Deterministic simulation module
//!
//! All boss-encounter logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (time is counted in ticks)
//! - Seeded RNG only
//! - Integer scaling math
//! - No IO, rendering or platform dependencies

pub mod arena;
pub mod boss;
pub mod combat;
pub mod error;
pub mod events;
pub mod mode;
pub mod projectile;
pub mod scaling;
pub mod state;
pub mod tick;

pub use arena::{ArenaController, ArenaPhase, BossArenaState, RunSummary};
pub use boss::{BOSS_SEQUENCE, BossConfig, BossType};
pub use combat::{Boss, BossCombatEngine, CombatState, DamageOutcome, DefeatReport};
pub use error::{ArenaError, ArenaResult};
pub use events::ArenaEvent;
pub use mode::{GameMode, ModeProfile, SequenceEnd};
pub use projectile::{ArenaBounds, BossProjectile, ProjectileKind, advance_projectiles};
pub use scaling::{Reward, ScaledBossConfig, reward, scale};
pub use state::RunState;
pub use tick::{TickInput, TickOutput, tick};
