//! The roll engine and roll results.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::die::Die;
use crate::entry::DiceEntry;
use crate::source::DieSource;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// The outcome of rolling one die.
///
/// Results from the same roll action share a timestamp. Together with the
/// label and die type it forms the key the history groups by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// The die that was rolled.
    #[serde(rename = "type")]
    pub die: Die,
    /// Label copied from the rolled entry.
    #[serde(default)]
    pub label: String,
    /// The face that came up, in `1..=die.faces()`.
    #[serde(rename = "result")]
    pub outcome: u32,
    /// Bonus copied from the rolled entry.
    #[serde(default)]
    pub bonus: i64,
    /// When the roll action happened.
    pub timestamp: Timestamp,
}

/// Rolls dice entries against a [`DieSource`].
#[derive(Debug, Clone)]
pub struct RollEngine<S> {
    source: S,
}

impl<S: DieSource> RollEngine<S> {
    /// Create an engine drawing from `source`.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Roll every entry once, in order, stamping all results with `timestamp`.
    ///
    /// An empty slice yields no results and draws nothing.
    pub fn roll(&mut self, entries: &[DiceEntry], timestamp: Timestamp) -> Vec<RollResult> {
        if entries.is_empty() {
            return Vec::new();
        }
        let results: Vec<RollResult> = entries
            .iter()
            .map(|entry| RollResult {
                die: entry.die,
                label: entry.label.clone(),
                outcome: self.source.draw(entry.die.faces()),
                bonus: entry.bonus,
                timestamp,
            })
            .collect();
        info!(dice = results.len(), timestamp, "rolled dice");
        results
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::source::FixedSource;
    use crate::tray::DiceTray;

    #[test]
    fn empty_roll_draws_nothing() {
        let mut engine = RollEngine::new(FixedSource::new([3]));
        assert!(engine.roll(&[], 1_000).is_empty());
        assert_eq!(engine.source().draws(), 0);
    }

    #[test]
    fn roll_uses_fixed_sequence_and_shared_timestamp() {
        let mut ids = SequentialIds::new(1);
        let mut tray = DiceTray::new();
        tray.add_dice(&mut ids, 3, Die::D6, 2, "Attack").unwrap();
        let entries = tray.drain();

        let mut engine = RollEngine::new(FixedSource::new([4, 6, 1]));
        let results = engine.roll(&entries, 1_700_000_000_000);

        let outcomes: Vec<u32> = results.iter().map(|r| r.outcome).collect();
        assert_eq!(outcomes, vec![4, 6, 1]);
        assert!(results.iter().all(|r| r.timestamp == 1_700_000_000_000));
        assert!(results.iter().all(|r| r.label == "Attack" && r.die == Die::D6));
        let bonuses: Vec<i64> = results.iter().map(|r| r.bonus).collect();
        assert_eq!(bonuses, vec![0, 0, 2]);
    }

    #[test]
    fn mixed_dice_keep_entry_order() {
        let mut ids = SequentialIds::new(1);
        let mut tray = DiceTray::new();
        tray.add_dice(&mut ids, 1, Die::D20, 5, "Hit").unwrap();
        tray.add_dice(&mut ids, 2, Die::D8, 3, "Damage").unwrap();

        let mut engine = RollEngine::new(FixedSource::new([17, 2, 8]));
        let results = engine.roll(&tray.drain(), 5);
        let dice: Vec<Die> = results.iter().map(|r| r.die).collect();
        assert_eq!(dice, vec![Die::D20, Die::D8, Die::D8]);
        assert_eq!(results[0].outcome, 17);
    }

    #[test]
    fn serializes_record_field_names() {
        let result = RollResult {
            die: Die::D20,
            label: "Perception".to_string(),
            outcome: 12,
            bonus: 4,
            timestamp: 42,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["type"], "d20");
        assert_eq!(value["result"], 12);
        assert_eq!(value["timestamp"], 42);
    }
}
