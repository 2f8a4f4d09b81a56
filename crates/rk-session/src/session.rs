//! Dice session management.
//!
//! `DiceSession` is the single owner of one character's tray, roll history
//! and presets. Rolls drain the tray at once but only join the history when
//! their reveal time comes up; history and preset changes are written back
//! to the character record by the debounced [`PersistenceSync`].

use std::collections::VecDeque;

use tracing::{debug, info};

use rk_dice::{
    DiceEntry, DiceTray, Die, DieSource, IdGenerator, Preset, PresetId, PresetStore, RandomIds,
    RngSource, RollEngine, RollGroup, RollHistory, RollResult, Timestamp,
};

use crate::clock::{Clock, SystemClock};
use crate::config::SessionConfig;
use crate::defaults::{DefaultPresetProvider, NoDefaults, PresetContext};
use crate::error::{SessionError, SessionResult};
use crate::record::{CharacterRecord, CharacterStore};
use crate::sync::{PersistenceSync, SyncState, Track};

/// Receipt for a roll that has been made but may not be visible yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollTicket {
    /// Timestamp shared by every result of the roll.
    pub timestamp: Timestamp,
    /// When the results join the history.
    pub reveal_at: Timestamp,
    /// Number of dice rolled.
    pub dice: usize,
}

/// What a call to [`DiceSession::poll`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Number of roll actions moved into the history.
    pub revealed: usize,
    /// Tracks written to the character record.
    pub flushed: Vec<Track>,
}

#[derive(Debug)]
struct PendingRoll {
    reveal_at: Timestamp,
    results: Vec<RollResult>,
}

/// An interactive dice session for one character.
pub struct DiceSession {
    tray: DiceTray,
    history: RollHistory,
    presets: PresetStore,
    pending: VecDeque<PendingRoll>,
    roll_delay_ms: u64,
    engine: RollEngine<Box<dyn DieSource>>,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
    defaults: Box<dyn DefaultPresetProvider>,
    store: Box<dyn CharacterStore>,
    sync: PersistenceSync,
}

impl DiceSession {
    /// Open a session on `store`.
    ///
    /// If the record is already loaded, the session starts from its history
    /// and presets; otherwise it starts empty.
    pub fn new(store: impl CharacterStore + 'static, config: SessionConfig) -> Self {
        let (history, presets) = match store.read() {
            Some(record) => (
                record.roll_history,
                PresetStore::from_presets(record.details.dice.presets),
            ),
            None => (RollHistory::new(), PresetStore::new()),
        };
        let source: Box<dyn DieSource> = match config.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        };
        debug!(
            rolls = history.len(),
            presets = presets.len(),
            "opened dice session"
        );

        Self {
            tray: DiceTray::new(),
            history,
            presets,
            pending: VecDeque::new(),
            roll_delay_ms: config.roll_delay_ms,
            engine: RollEngine::new(source),
            ids: Box::new(RandomIds),
            clock: Box::new(SystemClock),
            defaults: Box::new(NoDefaults),
            store: Box::new(store),
            sync: PersistenceSync::new(config.history_quiet_ms, config.presets_quiet_ms),
        }
    }

    /// Roll with `source` instead of the configured RNG.
    pub fn with_die_source(mut self, source: impl DieSource + 'static) -> Self {
        let source: Box<dyn DieSource> = Box::new(source);
        self.engine = RollEngine::new(source);
        self
    }

    /// Generate identifiers with `ids`.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Read time from `clock`.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Take default presets from `provider`.
    pub fn with_default_presets(mut self, provider: impl DefaultPresetProvider + 'static) -> Self {
        self.defaults = Box::new(provider);
        self
    }

    /// Get the tray.
    pub fn tray(&self) -> &DiceTray {
        &self.tray
    }

    /// Get the roll history.
    pub fn history(&self) -> &RollHistory {
        &self.history
    }

    /// Get the user's presets.
    pub fn presets(&self) -> &PresetStore {
        &self.presets
    }

    /// Get the character store.
    pub fn store(&self) -> &dyn CharacterStore {
        self.store.as_ref()
    }

    /// Hand the character record to the store once it becomes available.
    ///
    /// The session keeps its own history and presets. Any flush deferred
    /// while the record was missing goes out on the next [`poll`](Self::poll).
    pub fn load_record(&mut self, record: CharacterRecord) {
        info!(name = %record.name, "character record loaded");
        self.store.load(record);
    }

    /// Debounce state of a tracked collection.
    pub fn sync_state(&self, track: Track) -> SyncState {
        self.sync.track(track).state()
    }

    /// Both debounce tracks.
    pub fn sync(&self) -> &PersistenceSync {
        &self.sync
    }

    /// Add `count` dice written as `die` (e.g. `"d20"`) with one shared bonus.
    pub fn add_dice(
        &mut self,
        count: u32,
        die: &str,
        bonus: i64,
        label: &str,
    ) -> SessionResult<&[DiceEntry]> {
        let die: Die = die.parse()?;
        Ok(self
            .tray
            .add_dice(self.ids.as_mut(), count, die, bonus, label)?)
    }

    /// Add copies of `entries` to the tray under fresh identifiers.
    pub fn add_entries(&mut self, entries: &[DiceEntry]) -> &[DiceEntry] {
        self.tray.add_entries(self.ids.as_mut(), entries)
    }

    /// Remove the tray entry at `position`.
    pub fn remove_at(&mut self, position: usize) -> SessionResult<DiceEntry> {
        let removed = self.tray.remove_at(position).inspect_err(|err| {
            debug!(position, error = %err, "tray removal ignored");
        })?;
        Ok(removed)
    }

    /// Roll everything in the tray.
    ///
    /// The tray is emptied at once. The results join the history after the
    /// configured delay, on a later [`poll`](Self::poll), or immediately
    /// when the delay is zero. Returns `None` if the tray was empty.
    pub fn roll(&mut self) -> Option<RollTicket> {
        if self.tray.is_empty() {
            return None;
        }
        let timestamp = self.clock.now();
        let entries = self.tray.drain();
        let results = self.engine.roll(&entries, timestamp);
        let delay = i64::try_from(self.roll_delay_ms).unwrap_or(i64::MAX);
        let ticket = RollTicket {
            timestamp,
            reveal_at: timestamp.saturating_add(delay),
            dice: results.len(),
        };

        if self.roll_delay_ms == 0 {
            self.reveal(results, timestamp);
        } else {
            self.pending.push_back(PendingRoll {
                reveal_at: ticket.reveal_at,
                results,
            });
        }
        Some(ticket)
    }

    /// Whether a roll is waiting to be revealed.
    pub fn is_rolling(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drop rolls that have not been revealed yet. Returns how many.
    pub fn cancel_pending_rolls(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        if cancelled > 0 {
            info!(cancelled, "cancelled pending rolls");
        }
        cancelled
    }

    fn reveal(&mut self, results: Vec<RollResult>, now: Timestamp) {
        debug!(dice = results.len(), "revealing roll");
        self.history.extend(results);
        self.sync.touch(Track::History, now);
    }

    /// Groups of the history, newest roll action first.
    pub fn grouped_history(&self) -> Vec<RollGroup<'_>> {
        self.history.grouped()
    }

    /// Discard the whole roll history.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.sync.touch(Track::History, self.clock.now());
        info!("cleared roll history");
    }

    /// Save a copy of `dice` as a preset named `name`.
    pub fn save_preset(&mut self, name: &str, dice: &[DiceEntry]) -> PresetId {
        let id = self.presets.save_preset(self.ids.as_mut(), name, dice).id;
        self.sync.touch(Track::Presets, self.clock.now());
        id
    }

    /// Save the current tray as a preset. The tray keeps its dice.
    pub fn save_tray_as_preset(&mut self, name: &str) -> SessionResult<PresetId> {
        if self.tray.is_empty() {
            return Err(SessionError::EmptyPreset);
        }
        let id = self
            .presets
            .save_preset(self.ids.as_mut(), name, self.tray.entries())
            .id;
        self.sync.touch(Track::Presets, self.clock.now());
        Ok(id)
    }

    /// Delete a user preset. Returns whether it existed.
    pub fn delete_preset(&mut self, id: PresetId) -> bool {
        let removed = self.presets.delete_preset(id);
        if removed {
            self.sync.touch(Track::Presets, self.clock.now());
        }
        removed
    }

    /// User presets sorted by name.
    pub fn list_user_presets(&self) -> Vec<&Preset> {
        self.presets.list_user_presets()
    }

    /// Default presets for `context`, fetched from the provider.
    pub fn list_default_presets(&self, context: &PresetContext) -> Vec<Preset> {
        let owner = self.store.read();
        self.defaults.defaults_for(context, owner.as_ref())
    }

    /// Copies of a preset's dice with fresh identifiers.
    pub fn instantiate(&mut self, preset: &Preset) -> Vec<DiceEntry> {
        preset.instantiate(self.ids.as_mut())
    }

    /// Load a preset's dice into the tray.
    pub fn apply_preset(&mut self, preset: &Preset) -> &[DiceEntry] {
        debug!(preset = %preset.name, "applying preset");
        self.tray.add_entries(self.ids.as_mut(), &preset.dice)
    }

    /// Load a saved user preset into the tray. `None` if it does not exist.
    pub fn apply_user_preset(&mut self, id: PresetId) -> Option<&[DiceEntry]> {
        let preset = self.presets.get(id)?;
        debug!(preset = %preset.name, "applying preset");
        Some(self.tray.add_entries(self.ids.as_mut(), &preset.dice))
    }

    /// Reveal due rolls and write due collections to the character record.
    pub fn poll(&mut self) -> PollReport {
        let now = self.clock.now();
        let mut revealed = 0;
        while self.pending.front().is_some_and(|p| p.reveal_at <= now) {
            if let Some(roll) = self.pending.pop_front() {
                self.reveal(roll.results, now);
                revealed += 1;
            }
        }
        let flushed = self.sync.flush(
            now,
            false,
            self.store.as_mut(),
            &self.history,
            &self.presets,
        );
        PollReport { revealed, flushed }
    }

    /// Write every pending collection now, ignoring quiet periods.
    ///
    /// Collections stay pending if the record is still not loaded.
    pub fn flush_pending(&mut self) -> Vec<Track> {
        let now = self.clock.now();
        self.sync.flush(
            now,
            true,
            self.store.as_mut(),
            &self.history,
            &self.presets,
        )
    }
}
