//! The dice tray: entries waiting for the next roll.

use tracing::debug;

use crate::die::Die;
use crate::entry::DiceEntry;
use crate::error::{DiceError, DiceResult};
use crate::ids::IdGenerator;

/// An ordered collection of dice waiting to be rolled.
#[derive(Debug, Clone, Default)]
pub struct DiceTray {
    entries: Vec<DiceEntry>,
}

impl DiceTray {
    /// Create an empty tray.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` dice of one type under one label.
    ///
    /// The bonus lands on the last die of the batch only, so the batch as a
    /// whole carries it exactly once. Returns the entries just added.
    pub fn add_dice(
        &mut self,
        ids: &mut dyn IdGenerator,
        count: u32,
        die: Die,
        bonus: i64,
        label: &str,
    ) -> DiceResult<&[DiceEntry]> {
        if count == 0 {
            return Err(DiceError::InvalidCount(count));
        }
        let start = self.entries.len();
        for i in 0..count {
            let bonus = if i + 1 == count { bonus } else { 0 };
            self.entries.push(DiceEntry::new(ids, die, bonus, label));
        }
        debug!(count, %die, bonus, label, "added dice to tray");
        Ok(&self.entries[start..])
    }

    /// Append pre-built entries, each under a fresh identifier.
    pub fn add_entries<'a>(
        &mut self,
        ids: &mut dyn IdGenerator,
        entries: impl IntoIterator<Item = &'a DiceEntry>,
    ) -> &[DiceEntry] {
        let start = self.entries.len();
        self.entries
            .extend(entries.into_iter().map(|e| e.reidentified(ids)));
        debug!(added = self.entries.len() - start, "added entries to tray");
        &self.entries[start..]
    }

    /// Remove the entry at `position`. The tray is unchanged on error.
    pub fn remove_at(&mut self, position: usize) -> DiceResult<DiceEntry> {
        if position >= self.entries.len() {
            return Err(DiceError::OutOfRange {
                position,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(position))
    }

    /// Take every entry out of the tray, leaving it empty.
    pub fn drain(&mut self) -> Vec<DiceEntry> {
        std::mem::take(&mut self.entries)
    }

    /// The entries currently in the tray.
    pub fn entries(&self) -> &[DiceEntry] {
        &self.entries
    }

    /// Number of entries in the tray.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tray is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::ids::SequentialIds;

    #[test]
    fn add_dice_places_bonus_on_last() {
        let mut ids = SequentialIds::new(1);
        let mut tray = DiceTray::new();
        tray.add_dice(&mut ids, 3, Die::D6, 2, "Attack").unwrap();

        let entries = tray.drain();
        let bonuses: Vec<i64> = entries.iter().map(|e| e.bonus).collect();
        assert_eq!(bonuses, vec![0, 0, 2]);
        assert!(entries.iter().all(|e| e.die == Die::D6 && e.label == "Attack"));
        assert!(tray.is_empty());
    }

    #[test]
    fn add_single_die_keeps_bonus() {
        let mut ids = SequentialIds::new(1);
        let mut tray = DiceTray::new();
        let added = tray.add_dice(&mut ids, 1, Die::D20, -1, "Save").unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].bonus, -1);
    }

    #[test]
    fn add_zero_dice_is_rejected() {
        let mut ids = SequentialIds::new(1);
        let mut tray = DiceTray::new();
        let err = tray.add_dice(&mut ids, 0, Die::D6, 0, "").unwrap_err();
        assert_eq!(err, DiceError::InvalidCount(0));
        assert!(tray.is_empty());
        assert_eq!(ids.issued(), 0);
    }

    #[test]
    fn every_entry_gets_its_own_id() {
        let mut ids = SequentialIds::new(1);
        let mut tray = DiceTray::new();
        tray.add_dice(&mut ids, 4, Die::D4, 0, "").unwrap();
        let seen: HashSet<_> = tray.entries().iter().map(|e| e.id).collect();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn add_entries_reidentifies() {
        let mut ids = SequentialIds::new(1);
        let mut source = DiceTray::new();
        source.add_dice(&mut ids, 2, Die::D8, 1, "Bless").unwrap();

        let mut tray = DiceTray::new();
        let added = tray.add_entries(&mut ids, source.entries()).to_vec();
        assert_eq!(added.len(), 2);
        for (copy, original) in added.iter().zip(source.entries()) {
            assert_ne!(copy.id, original.id);
            assert_eq!(copy.die, original.die);
            assert_eq!(copy.bonus, original.bonus);
            assert_eq!(copy.label, original.label);
        }
    }

    #[test]
    fn remove_at_removes_one() {
        let mut ids = SequentialIds::new(1);
        let mut tray = DiceTray::new();
        tray.add_dice(&mut ids, 1, Die::D4, 0, "a").unwrap();
        tray.add_dice(&mut ids, 1, Die::D6, 0, "b").unwrap();
        tray.add_dice(&mut ids, 1, Die::D8, 0, "c").unwrap();

        let removed = tray.remove_at(1).unwrap();
        assert_eq!(removed.label, "b");
        let labels: Vec<&str> = tray.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "c"]);
    }

    #[test]
    fn remove_out_of_range_leaves_tray() {
        let mut ids = SequentialIds::new(1);
        let mut tray = DiceTray::new();
        tray.add_dice(&mut ids, 2, Die::D6, 0, "").unwrap();
        let err = tray.remove_at(2).unwrap_err();
        assert_eq!(err, DiceError::OutOfRange { position: 2, len: 2 });
        assert_eq!(tray.len(), 2);
    }

    #[test]
    fn drain_empties_tray() {
        let mut ids = SequentialIds::new(1);
        let mut tray = DiceTray::new();
        tray.add_dice(&mut ids, 2, Die::D10, 0, "").unwrap();
        assert_eq!(tray.drain().len(), 2);
        assert!(tray.drain().is_empty());
    }
}
