//! Result records handed to the backend
//!
//! Field names and order are the backend's wire format (camelCase JSON).

use serde::{Deserialize, Serialize};

use crate::sim::BossType;

/// Sent once per defeated boss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BossDefeatRecord {
    pub boss_type: BossType,
    pub kill_time_seconds: f64,
    pub distance_at_defeat: f32,
}

/// Sent when a rush or endless arena run ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArenaCompletionRecord {
    pub completion_time_seconds: f64,
    pub total_score: u64,
    pub bosses_defeated: Vec<BossType>,
    pub is_endless_mode: bool,
}

/// One outbound fire-and-forget submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Submission {
    BossDefeat(BossDefeatRecord),
    ArenaCompletion(ArenaCompletionRecord),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_wire_format() {
        let record = ArenaCompletionRecord {
            completion_time_seconds: 42.5,
            total_score: 1850,
            bosses_defeated: vec![BossType::Mech, BossType::Dragon],
            is_endless_mode: false,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"completionTimeSeconds":42.5,"totalScore":1850,"bossesDefeated":["mech","dragon"],"isEndlessMode":false}"#
        );
    }

    #[test]
    fn test_defeat_wire_format() {
        let record = BossDefeatRecord {
            boss_type: BossType::Titan,
            kill_time_seconds: 12.0,
            distance_at_defeat: 1500.0,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"bossType":"titan","killTimeSeconds":12.0,"distanceAtDefeat":1500.0}"#
        );
    }
}
