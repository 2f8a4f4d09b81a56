//! Dice model for Rollkeeper.
//!
//! Provides die types, the dice tray that collects entries before a roll,
//! the roll engine, the grouped roll history, and user-defined presets.
//! Randomness and identifier generation sit behind small traits so callers
//! can swap in seeded or replayed sources.

pub mod die;
pub mod engine;
pub mod entry;
pub mod error;
pub mod history;
pub mod ids;
pub mod preset;
pub mod source;
pub mod tray;

pub use die::Die;
pub use engine::{RollEngine, RollResult, Timestamp};
pub use entry::{DiceEntry, DiceId};
pub use error::{DiceError, DiceResult};
pub use history::{GroupKey, GroupSummary, Grouping, RollGroup, RollHistory};
pub use ids::{IdGenerator, RandomIds, SequentialIds};
pub use preset::{Preset, PresetId, PresetStore};
pub use source::{DieSource, FixedSource, RngSource};
pub use tray::DiceTray;
