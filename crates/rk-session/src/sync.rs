//! Debounced write-back of session state into the character record.
//!
//! Each tracked collection runs its own `Idle -> PendingFlush -> Idle`
//! cycle. A change pushes the track's deadline out by its quiet period; the
//! flush happens on the first poll at or after the deadline and writes the
//! collection as it is at that moment. A record that is not loaded yet
//! leaves the track pending, so the next poll tries again.

use std::fmt;

use tracing::{info, warn};

use rk_dice::{PresetStore, RollHistory, Timestamp};

use crate::error::StoreError;
use crate::record::{CharacterStore, RecordPatch};

/// A collection kept in sync with the character record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    /// The roll history.
    History,
    /// The user's presets.
    Presets,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::History => write!(f, "history"),
            Self::Presets => write!(f, "presets"),
        }
    }
}

/// Where a track is in its debounce cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Nothing to write.
    Idle,
    /// A write is owed once the deadline passes.
    PendingFlush {
        /// Earliest time the write may happen.
        due_at: Timestamp,
    },
}

/// Debounce state for one tracked collection.
#[derive(Debug, Clone)]
pub struct SyncTrack {
    quiet_ms: u64,
    state: SyncState,
    flushes: u64,
}

impl SyncTrack {
    /// An idle track with the given quiet period.
    pub fn new(quiet_ms: u64) -> Self {
        Self {
            quiet_ms,
            state: SyncState::Idle,
            flushes: 0,
        }
    }

    /// Record a change at `now`, restarting the quiet period.
    pub fn touch(&mut self, now: Timestamp) {
        let quiet = i64::try_from(self.quiet_ms).unwrap_or(i64::MAX);
        self.state = SyncState::PendingFlush {
            due_at: now.saturating_add(quiet),
        };
    }

    /// Whether a flush is owed and its deadline has passed.
    pub fn is_due(&self, now: Timestamp) -> bool {
        matches!(self.state, SyncState::PendingFlush { due_at } if now >= due_at)
    }

    /// Whether a flush is owed at all.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, SyncState::PendingFlush { .. })
    }

    /// Current state.
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Number of completed flushes.
    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    fn complete(&mut self) {
        self.state = SyncState::Idle;
        self.flushes += 1;
    }
}

/// The history and presets tracks, flushed independently.
#[derive(Debug, Clone)]
pub struct PersistenceSync {
    history: SyncTrack,
    presets: SyncTrack,
}

impl PersistenceSync {
    /// Create both tracks with their quiet periods.
    pub fn new(history_quiet_ms: u64, presets_quiet_ms: u64) -> Self {
        Self {
            history: SyncTrack::new(history_quiet_ms),
            presets: SyncTrack::new(presets_quiet_ms),
        }
    }

    /// Record a change to `track` at `now`.
    pub fn touch(&mut self, track: Track, now: Timestamp) {
        self.track_mut(track).touch(now);
    }

    /// The debounce state of `track`.
    pub fn track(&self, track: Track) -> &SyncTrack {
        match track {
            Track::History => &self.history,
            Track::Presets => &self.presets,
        }
    }

    fn track_mut(&mut self, track: Track) -> &mut SyncTrack {
        match track {
            Track::History => &mut self.history,
            Track::Presets => &mut self.presets,
        }
    }

    /// Write every track whose deadline has passed. With `force`, write
    /// every pending track regardless of its deadline.
    ///
    /// Returns the tracks that were written.
    pub fn flush(
        &mut self,
        now: Timestamp,
        force: bool,
        store: &mut dyn CharacterStore,
        history: &RollHistory,
        presets: &PresetStore,
    ) -> Vec<Track> {
        let mut flushed = Vec::new();
        for track in [Track::History, Track::Presets] {
            let state = self.track(track);
            let owed = if force {
                state.is_pending()
            } else {
                state.is_due(now)
            };
            if !owed {
                continue;
            }
            if !store.is_loaded() {
                warn!(%track, "character record not loaded, deferring flush");
                continue;
            }
            let patch = match track {
                Track::History => RecordPatch::history(history.clone()),
                Track::Presets => RecordPatch::presets(presets.presets().to_vec()),
            };
            match store.write(patch) {
                Ok(()) => {
                    self.track_mut(track).complete();
                    info!(%track, "flushed to character record");
                    flushed.push(track);
                }
                Err(StoreError::NotLoaded) => {
                    warn!(%track, "character record not loaded, deferring flush");
                }
                Err(err) => {
                    warn!(%track, error = %err, "character record write failed, will retry");
                }
            }
        }
        flushed
    }
}
