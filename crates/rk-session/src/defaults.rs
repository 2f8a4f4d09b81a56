//! Default presets supplied from outside the session.
//!
//! Default presets are read-only. The session asks the provider for them on
//! every listing and never stores or persists them.

use std::collections::HashMap;
use std::fmt;

use rk_dice::Preset;

use crate::record::CharacterRecord;

/// The kind of entity default presets are requested for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PresetContext {
    /// A player character.
    Character,
    /// Any other context, by tag.
    Custom(String),
}

impl PresetContext {
    /// Parse a context tag such as `"CHARACTER"`.
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "CHARACTER" => Self::Character,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for PresetContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => write!(f, "CHARACTER"),
            Self::Custom(tag) => write!(f, "{tag}"),
        }
    }
}

/// Supplies read-only default presets for a context.
pub trait DefaultPresetProvider {
    /// Default presets for `context`, given the owning record when loaded.
    fn defaults_for(&self, context: &PresetContext, owner: Option<&CharacterRecord>)
    -> Vec<Preset>;
}

/// A provider that has no defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl DefaultPresetProvider for NoDefaults {
    fn defaults_for(&self, _: &PresetContext, _: Option<&CharacterRecord>) -> Vec<Preset> {
        Vec::new()
    }
}

/// A fixed table of default presets per context.
#[derive(Debug, Clone, Default)]
pub struct StaticPresets {
    table: HashMap<PresetContext, Vec<Preset>>,
}

impl StaticPresets {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `presets` under `context`, after any already registered.
    pub fn with(mut self, context: PresetContext, presets: Vec<Preset>) -> Self {
        self.table.entry(context).or_default().extend(presets);
        self
    }
}

impl DefaultPresetProvider for StaticPresets {
    fn defaults_for(&self, context: &PresetContext, _: Option<&CharacterRecord>) -> Vec<Preset> {
        self.table.get(context).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use rk_dice::{DiceEntry, Die, SequentialIds};

    use super::*;

    #[test]
    fn context_parse_and_display() {
        assert_eq!(PresetContext::parse("character"), PresetContext::Character);
        assert_eq!(PresetContext::Character.to_string(), "CHARACTER");
        assert_eq!(
            PresetContext::parse("creature"),
            PresetContext::Custom("CREATURE".to_string())
        );
    }

    #[test]
    fn static_presets_by_context() {
        let mut ids = SequentialIds::new(9);
        let d20 = DiceEntry::new(&mut ids, Die::D20, 0, "Check");
        let provider = StaticPresets::new().with(
            PresetContext::Character,
            vec![Preset::new(&mut ids, "Ability Check", &[d20])],
        );

        let presets = provider.defaults_for(&PresetContext::Character, None);
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].name, "Ability Check");
        assert!(
            provider
                .defaults_for(&PresetContext::parse("ITEM"), None)
                .is_empty()
        );
    }

    #[test]
    fn no_defaults_is_empty() {
        assert!(
            NoDefaults
                .defaults_for(&PresetContext::Character, None)
                .is_empty()
        );
    }
}
