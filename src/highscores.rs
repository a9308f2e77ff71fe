//! Rush/endless leaderboard
//!
//! Persisted to LocalStorage, keeps the top 10 results per mode and the best
//! kill time per boss.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::persistence::{ArenaCompletionRecord, BossDefeatRecord, ResultStore, SubmitError};
use crate::sim::BossType;

/// Maximum number of entries kept per board
pub const MAX_HIGH_SCORES: usize = 10;

/// Leaderboards for both scored modes
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Leaderboard {
    pub rush: Vec<ArenaCompletionRecord>,
    pub endless: Vec<ArenaCompletionRecord>,
    /// Fastest kill per boss, in seconds
    #[serde(default)]
    pub best_kill_times: BTreeMap<BossType, f64>,
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "boss_arena_leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    fn board(&self, endless: bool) -> &Vec<ArenaCompletionRecord> {
        if endless { &self.endless } else { &self.rush }
    }

    /// Check if a score qualifies for the given board
    pub fn qualifies(&self, score: u64, endless: bool) -> bool {
        if score == 0 {
            return false;
        }
        let board = self.board(endless);
        if board.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        board.last().map(|e| score > e.total_score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u64, endless: bool) -> Option<usize> {
        if !self.qualifies(score, endless) {
            return None;
        }
        let board = self.board(endless);
        let rank = board.iter().position(|e| score > e.total_score);
        Some(rank.unwrap_or(board.len()) + 1)
    }

    /// Add a completion record (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add(&mut self, record: ArenaCompletionRecord) -> Option<usize> {
        let endless = record.is_endless_mode;
        if !self.qualifies(record.total_score, endless) {
            return None;
        }

        let board = if endless {
            &mut self.endless
        } else {
            &mut self.rush
        };

        // Sorted descending by score; equal scores keep arrival order
        let pos = board.iter().position(|e| record.total_score > e.total_score);
        let rank = match pos {
            Some(i) => {
                board.insert(i, record);
                i + 1
            }
            None => {
                board.push(record);
                board.len()
            }
        };

        board.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Record a kill time; returns true if it is a new best
    pub fn add_kill_time(&mut self, boss: BossType, seconds: f64) -> bool {
        match self.best_kill_times.get(&boss) {
            Some(&best) if best <= seconds => false,
            _ => {
                self.best_kill_times.insert(boss, seconds);
                true
            }
        }
    }

    /// Check if both boards are empty
    pub fn is_empty(&self) -> bool {
        self.rush.is_empty() && self.endless.is_empty()
    }

    /// Get the top score of a board (if any)
    pub fn top_score(&self, endless: bool) -> Option<u64> {
        self.board(endless).first().map(|e| e.total_score)
    }

    pub fn to_json(&self) -> Result<String, SubmitError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SubmitError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the leaderboard from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(board) = Self::from_json(&json) {
                    log::info!(
                        "Loaded leaderboard ({} rush, {} endless)",
                        board.rush.len(),
                        board.endless.len()
                    );
                    return board;
                }
            }
        }

        log::info!("No leaderboard found, starting fresh");
        Self::new()
    }

    /// Save the leaderboard to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) -> Result<(), SubmitError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| SubmitError::Storage("LocalStorage unavailable".into()))?;
        let json = self.to_json()?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|_| SubmitError::Storage("LocalStorage write rejected".into()))?;
        log::info!("Leaderboard saved");
        Ok(())
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> Result<(), SubmitError> {
        // No-op for native
        Ok(())
    }
}

impl ResultStore for Leaderboard {
    fn record_defeat(&mut self, record: &BossDefeatRecord) -> Result<(), SubmitError> {
        if self.add_kill_time(record.boss_type, record.kill_time_seconds) {
            self.save()?;
        }
        Ok(())
    }

    fn record_completion(&mut self, record: &ArenaCompletionRecord) -> Result<(), SubmitError> {
        if let Some(rank) = self.add(record.clone()) {
            log::info!("New leaderboard entry at rank {rank}");
            self.save()?;
        }
        Ok(())
    }
}
