//! The character record and the store that owns it.
//!
//! The session only reads and replaces two fields of the record: the roll
//! history and the saved dice presets. Everything else the host keeps on the
//! record is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use rk_dice::{Preset, RollHistory};

use crate::error::{StoreError, StoreResult};

/// A character as the external store exposes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    /// Display name of the character.
    #[serde(default)]
    pub name: String,
    /// Every die this character has rolled.
    #[serde(default)]
    pub roll_history: RollHistory,
    /// Nested character details.
    #[serde(default)]
    pub details: CharacterDetails,
    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `details` block of a character record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterDetails {
    /// Dice settings.
    #[serde(default)]
    pub dice: DiceDetails,
    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `details.dice` block of a character record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiceDetails {
    /// User-defined presets.
    #[serde(default)]
    pub presets: Vec<Preset>,
    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CharacterRecord {
    /// Apply a patch, replacing each present collection wholesale.
    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(history) = patch.roll_history {
            self.roll_history = history;
        }
        if let Some(presets) = patch.presets {
            self.details.dice.presets = presets;
        }
    }
}

/// A whole-collection update to a character record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    /// Replacement roll history.
    pub roll_history: Option<RollHistory>,
    /// Replacement preset list.
    pub presets: Option<Vec<Preset>>,
}

impl RecordPatch {
    /// A patch replacing only the roll history.
    pub fn history(history: RollHistory) -> Self {
        Self {
            roll_history: Some(history),
            presets: None,
        }
    }

    /// A patch replacing only the presets.
    pub fn presets(presets: Vec<Preset>) -> Self {
        Self {
            roll_history: None,
            presets: Some(presets),
        }
    }
}

/// External owner of the character record.
pub trait CharacterStore {
    /// Whether the record is available for reading and writing.
    fn is_loaded(&self) -> bool;

    /// A copy of the record, or `None` until it has been loaded.
    fn read(&self) -> Option<CharacterRecord>;

    /// Replace the collections present in `patch`.
    fn write(&mut self, patch: RecordPatch) -> StoreResult<()>;

    /// Make `record` available, replacing any previous one.
    fn load(&mut self, record: CharacterRecord);
}

/// An in-process character store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    record: Option<CharacterRecord>,
    writes: usize,
}

impl MemoryStore {
    /// A store whose record has not arrived yet.
    pub fn unloaded() -> Self {
        Self::default()
    }

    /// A store holding `record`.
    pub fn loaded(record: CharacterRecord) -> Self {
        Self {
            record: Some(record),
            writes: 0,
        }
    }

    /// The stored record, if loaded.
    pub fn record(&self) -> Option<&CharacterRecord> {
        self.record.as_ref()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl CharacterStore for MemoryStore {
    fn is_loaded(&self) -> bool {
        self.record.is_some()
    }

    fn read(&self) -> Option<CharacterRecord> {
        self.record.clone()
    }

    fn write(&mut self, patch: RecordPatch) -> StoreResult<()> {
        let record = self.record.as_mut().ok_or(StoreError::NotLoaded)?;
        debug!(
            history = patch.roll_history.is_some(),
            presets = patch.presets.is_some(),
            "writing character record"
        );
        record.apply(patch);
        self.writes += 1;
        Ok(())
    }

    fn load(&mut self, record: CharacterRecord) {
        self.record = Some(record);
    }
}
