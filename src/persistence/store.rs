//! Result stores

use super::SubmitError;
use super::records::{ArenaCompletionRecord, BossDefeatRecord, Submission};

/// Something that accepts result records
pub trait ResultStore {
    fn record_defeat(&mut self, record: &BossDefeatRecord) -> Result<(), SubmitError>;

    fn record_completion(&mut self, record: &ArenaCompletionRecord) -> Result<(), SubmitError>;

    fn submit(&mut self, submission: &Submission) -> Result<(), SubmitError> {
        match submission {
            Submission::BossDefeat(r) => self.record_defeat(r),
            Submission::ArenaCompletion(r) => self.record_completion(r),
        }
    }
}

/// Keeps encoded rows in memory, exactly as they would go over the wire
#[derive(Debug, Default)]
pub struct MemoryStore {
    defeats: Vec<String>,
    completions: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defeats(&self) -> Result<Vec<BossDefeatRecord>, SubmitError> {
        self.defeats
            .iter()
            .map(|row| serde_json::from_str(row).map_err(SubmitError::from))
            .collect()
    }

    pub fn completions(&self) -> Result<Vec<ArenaCompletionRecord>, SubmitError> {
        self.completions
            .iter()
            .map(|row| serde_json::from_str(row).map_err(SubmitError::from))
            .collect()
    }
}

impl ResultStore for MemoryStore {
    fn record_defeat(&mut self, record: &BossDefeatRecord) -> Result<(), SubmitError> {
        self.defeats.push(serde_json::to_string(record)?);
        Ok(())
    }

    fn record_completion(&mut self, record: &ArenaCompletionRecord) -> Result<(), SubmitError> {
        self.completions.push(serde_json::to_string(record)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BossType;

    #[test]
    fn test_rush_completion_round_trip() {
        let record = ArenaCompletionRecord {
            completion_time_seconds: 61.25,
            total_score: 2212,
            bosses_defeated: vec![BossType::Mech, BossType::Dragon, BossType::Titan],
            is_endless_mode: false,
        };
        let mut store = MemoryStore::new();
        store
            .submit(&Submission::ArenaCompletion(record.clone()))
            .unwrap();
        assert_eq!(store.completions().unwrap(), vec![record]);
        assert!(store.defeats().unwrap().is_empty());
    }

    #[test]
    fn test_defeat_round_trip() {
        let record = BossDefeatRecord {
            boss_type: BossType::Dragon,
            kill_time_seconds: 7.5,
            distance_at_defeat: 2310.5,
        };
        let mut store = MemoryStore::new();
        store.submit(&Submission::BossDefeat(record.clone())).unwrap();
        assert_eq!(store.defeats().unwrap(), vec![record]);
    }
}
