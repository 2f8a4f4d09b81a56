//! Error types for dice sessions and character stores.

use thiserror::Error;

use rk_dice::DiceError;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors reported by [`DiceSession`](crate::DiceSession) operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A tray edit was rejected.
    #[error(transparent)]
    Dice(#[from] DiceError),

    /// A preset needs at least one die.
    #[error("cannot save an empty tray as a preset")]
    EmptyPreset,
}

/// Result type for character store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors a [`CharacterStore`](crate::CharacterStore) can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The character record has not been loaded yet.
    #[error("character record not loaded")]
    NotLoaded,

    /// The store refused the write.
    #[error("write rejected: {0}")]
    Rejected(String),
}
