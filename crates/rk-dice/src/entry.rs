//! Dice entries: one die waiting in a tray or stored in a preset.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::die::Die;
use crate::ids::IdGenerator;

/// Unique identifier of a dice entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiceId(pub Uuid);

impl DiceId {
    /// Draw a fresh identifier from the generator.
    pub fn generate(ids: &mut dyn IdGenerator) -> Self {
        Self(ids.generate())
    }
}

impl fmt::Display for DiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A single die with its bonus and label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceEntry {
    /// Identity of this entry.
    pub id: DiceId,
    /// The die to roll.
    #[serde(rename = "type")]
    pub die: Die,
    /// Visual theme name. Carried along, never interpreted.
    #[serde(default)]
    pub theme: String,
    /// Flat modifier added once to the roll total.
    #[serde(default)]
    pub bonus: i64,
    /// Free-text label shared by dice rolled for the same purpose.
    #[serde(default)]
    pub label: String,
}

impl DiceEntry {
    /// Create an entry with a fresh identifier and no theme.
    pub fn new(ids: &mut dyn IdGenerator, die: Die, bonus: i64, label: impl Into<String>) -> Self {
        Self {
            id: DiceId::generate(ids),
            die,
            theme: String::new(),
            bonus,
            label: label.into(),
        }
    }

    /// Copy this entry under a new identifier.
    pub fn reidentified(&self, ids: &mut dyn IdGenerator) -> Self {
        Self {
            id: DiceId::generate(ids),
            ..self.clone()
        }
    }

    /// Compact notation such as `d6` or `d20-1`.
    pub fn notation(&self) -> String {
        match self.bonus {
            0 => self.die.to_string(),
            b if b > 0 => format!("{}+{b}", self.die),
            b => format!("{}{b}", self.die),
        }
    }
}
