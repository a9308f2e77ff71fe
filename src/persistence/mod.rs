//! Outbound result persistence
//!
//! Features:
//! - Backend record formats (camelCase JSON)
//! - `ResultStore` trait for whatever keeps the records
//! - Fire-and-forget `Dispatcher`: the tick loop never waits on a write,
//!   and a failed write never touches simulation state

pub mod dispatch;
pub mod records;
pub mod store;

pub use dispatch::{Dispatcher, SubmissionFailure};
pub use records::{ArenaCompletionRecord, BossDefeatRecord, Submission};
pub use store::{MemoryStore, ResultStore};

use thiserror::Error;

/// A submission that did not reach the store
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to encode record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage write failed: {0}")]
    Storage(String),
    #[error("result worker is gone")]
    Disconnected,
}
