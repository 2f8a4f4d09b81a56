//! Roll history and its grouped display view.
//!
//! The history stores results in the order they were rolled and never
//! reorders them. Grouping and newest-first ordering are computed on every
//! read by [`Grouping`].

pub mod group;

pub use group::{GroupKey, GroupSummary, Grouping, RollGroup};

use serde::{Deserialize, Serialize};

use crate::engine::RollResult;

/// An append-only log of roll results, in roll order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollHistory {
    #[serde(default)]
    rolls: Vec<RollResult>,
}

impl RollHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a history from previously stored results.
    pub fn from_results(rolls: Vec<RollResult>) -> Self {
        Self { rolls }
    }

    /// Append one roll action's results.
    pub fn extend(&mut self, batch: impl IntoIterator<Item = RollResult>) {
        self.rolls.extend(batch);
    }

    /// Discard every result.
    pub fn clear(&mut self) {
        self.rolls.clear();
    }

    /// All results in roll order.
    pub fn results(&self) -> &[RollResult] {
        &self.rolls
    }

    /// Number of individual die results.
    pub fn len(&self) -> usize {
        self.rolls.len()
    }

    /// Whether nothing has been rolled.
    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    /// Group results by label, timestamp and die type.
    pub fn group(&self) -> Grouping<'_> {
        Grouping::from_results(&self.rolls)
    }

    /// Groups in display order, newest roll action first.
    pub fn grouped(&self) -> Vec<RollGroup<'_>> {
        self.group().into_display_groups()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::die::Die;

    fn result(die: Die, label: &str, outcome: u32, timestamp: i64) -> RollResult {
        RollResult {
            die,
            label: label.to_string(),
            outcome,
            bonus: 0,
            timestamp,
        }
    }

    #[test]
    fn empty_history() {
        let history = RollHistory::new();
        assert!(history.is_empty());
        assert!(history.group().is_empty());
        assert!(history.grouped().is_empty());
    }

    #[test]
    fn extend_keeps_roll_order() {
        let mut history = RollHistory::new();
        history.extend(vec![result(Die::D6, "a", 1, 10)]);
        history.extend(vec![result(Die::D6, "b", 2, 20)]);
        let labels: Vec<&str> = history.results().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn grouped_does_not_reorder_storage() {
        let mut history = RollHistory::new();
        history.extend(vec![result(Die::D6, "old", 1, 10)]);
        history.extend(vec![result(Die::D6, "new", 2, 20)]);
        let groups = history.grouped();
        assert_eq!(groups[0].key().label, "new");
        assert_eq!(history.results()[0].label, "old");
    }

    #[test]
    fn clear_discards_everything() {
        let mut history = RollHistory::from_results(vec![result(Die::D4, "", 3, 1)]);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn serializes_under_rolls() {
        let history = RollHistory::from_results(vec![result(Die::D4, "x", 3, 1)]);
        let value = serde_json::to_value(&history).unwrap();
        assert_eq!(value["rolls"][0]["result"], 3);
        let empty: RollHistory = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
