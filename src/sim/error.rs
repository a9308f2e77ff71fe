//! Contract violations raised by the arena and combat engine
//!
//! None of these are recoverable gameplay errors: the call is rejected and
//! state is left exactly as it was.

use thiserror::Error;

use super::arena::ArenaPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArenaError {
    #[error("arena is not fighting (phase {phase:?})")]
    NotFighting { phase: ArenaPhase },
    #[error("boss is already defeated")]
    BossAlreadyDefeated,
    #[error("no arena in progress (phase {phase:?})")]
    NotInArena { phase: ArenaPhase },
}

pub type ArenaResult<T> = Result<T, ArenaError>;
