//! Per-run state owned by the game-loop driver
//!
//! One `RunState` per run: created when the run starts, dropped when it ends.
//! Nothing here is persisted mid-run.

use super::arena::{ArenaController, RunSummary};
use super::mode::GameMode;
use crate::tuning::{ArenaTuning, TuningError};

pub struct RunState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Cumulative distance travelled
    pub distance: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Run ended (death anywhere, or explicit exit)
    pub finished: bool,
    pub arena: ArenaController,
}

impl RunState {
    pub fn new(seed: u64, mode: GameMode) -> Self {
        Self::build(seed, mode, ArenaTuning::default())
    }

    /// Start a run with custom balance; rejects tuning that fails validation
    pub fn with_tuning(seed: u64, mode: GameMode, tuning: ArenaTuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, mode, tuning))
    }

    fn build(seed: u64, mode: GameMode, tuning: ArenaTuning) -> Self {
        Self {
            seed,
            distance: 0.0,
            time_ticks: 0,
            finished: false,
            arena: ArenaController::new(mode, tuning, seed),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.arena.mode()
    }

    /// Terminal result for persistence
    pub fn summary(&self) -> RunSummary {
        self.arena.summary()
    }
}
