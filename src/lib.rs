//! Boss Arena - boss encounter subsystem for an endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty scaling, boss combat, arena state machine)
//! - `persistence`: Outbound result records and fire-and-forget submission
//! - `highscores`: Rush/endless leaderboard
//! - `tuning`: Data-driven combat balance
//! - `settings`: Player preferences
//! - `audio`: Sound and haptic cues keyed to arena events

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::Leaderboard;
pub use settings::Settings;
pub use tuning::ArenaTuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (the game loop ticks at 60 Hz)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Break between story bosses (3 seconds)
    pub const BREAK_DURATION_TICKS: u32 = 180;
    /// Floor for scaled attack intervals
    pub const MIN_ATTACK_INTERVAL: u32 = 20;
    /// How long `is_attacking` stays up after an attack fires
    pub const ATTACK_DISPLAY_TICKS: u32 = 30;
    /// Projectiles older than this are dropped even if still on screen
    pub const PROJECTILE_MAX_LIFETIME_TICKS: u32 = 300;

    /// Arena dimensions (logical units, y grows downward, ground at ARENA_GROUND_Y)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 400.0;
    pub const ARENA_GROUND_Y: f32 = 340.0;
    /// Right-hand margin between the boss and the arena edge
    pub const BOSS_MARGIN_X: f32 = 40.0;
}

/// Convert a tick count to seconds at the fixed simulation rate
#[inline]
pub fn ticks_to_seconds(ticks: u64) -> f64 {
    ticks as f64 / consts::TICKS_PER_SECOND as f64
}
