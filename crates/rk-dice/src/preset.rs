//! Named, reusable dice collections.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::entry::DiceEntry;
use crate::ids::IdGenerator;

/// Unique identifier of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetId(pub Uuid);

impl PresetId {
    /// Draw a fresh identifier from the generator.
    pub fn generate(ids: &mut dyn IdGenerator) -> Self {
        Self(ids.generate())
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A named dice collection that can be loaded into a tray.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Identity of this preset.
    pub id: PresetId,
    /// Display name.
    pub name: String,
    /// The dice, in tray order.
    #[serde(default)]
    pub dice: Vec<DiceEntry>,
}

impl Preset {
    /// Create a preset holding a copy of `dice`.
    pub fn new(ids: &mut dyn IdGenerator, name: impl Into<String>, dice: &[DiceEntry]) -> Self {
        Self {
            id: PresetId::generate(ids),
            name: name.into(),
            dice: dice.to_vec(),
        }
    }

    /// Copies of this preset's dice, each under a fresh identifier.
    pub fn instantiate(&self, ids: &mut dyn IdGenerator) -> Vec<DiceEntry> {
        self.dice.iter().map(|d| d.reidentified(ids)).collect()
    }
}

/// The user's own presets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetStore {
    presets: Vec<Preset>,
}

impl PresetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously saved presets, keeping their order.
    pub fn from_presets(presets: Vec<Preset>) -> Self {
        Self { presets }
    }

    /// Save a snapshot of `dice` under `name`.
    pub fn save_preset(
        &mut self,
        ids: &mut dyn IdGenerator,
        name: &str,
        dice: &[DiceEntry],
    ) -> &Preset {
        let preset = Preset::new(ids, name, dice);
        debug!(id = %preset.id, name, dice = dice.len(), "saved preset");
        self.presets.push(preset);
        &self.presets[self.presets.len() - 1]
    }

    /// Delete the preset with `id`. Returns whether anything was removed.
    pub fn delete_preset(&mut self, id: PresetId) -> bool {
        let before = self.presets.len();
        self.presets.retain(|p| p.id != id);
        let removed = self.presets.len() != before;
        debug!(%id, removed, "deleted preset");
        removed
    }

    /// Look up a preset by identifier.
    pub fn get(&self, id: PresetId) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    /// Presets sorted by name, ignoring case. Equal names keep creation order.
    pub fn list_user_presets(&self) -> Vec<&Preset> {
        let mut sorted: Vec<&Preset> = self.presets.iter().collect();
        sorted.sort_by_cached_key(|p| p.name.to_lowercase());
        sorted
    }

    /// Presets in creation order, as they are persisted.
    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Number of saved presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether no presets are saved.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
