//! Session state for the Rollkeeper dice roller.
//!
//! A [`DiceSession`] owns the tray, the roll history and the user's presets
//! for one character. Roll results are revealed after a short pacing delay,
//! and every change to the history or presets is written back to the
//! character record once a quiet period has passed. Time only moves when
//! the host calls [`DiceSession::poll`].

pub mod clock;
pub mod config;
pub mod defaults;
pub mod error;
pub mod record;
pub mod session;
pub mod sync;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SessionConfig;
pub use defaults::{DefaultPresetProvider, NoDefaults, PresetContext, StaticPresets};
pub use error::{SessionError, SessionResult, StoreError, StoreResult};
pub use record::{
    CharacterDetails, CharacterRecord, CharacterStore, DiceDetails, MemoryStore, RecordPatch,
};
pub use session::{DiceSession, PollReport, RollTicket};
pub use sync::{PersistenceSync, SyncState, SyncTrack, Track};
