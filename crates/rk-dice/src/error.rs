//! Error types for the dice model.

/// Errors that can occur while editing the tray or parsing dice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// The die notation could not be parsed into a face count.
    #[error("invalid die: \"{0}\"")]
    InvalidDie(String),

    /// A batch add asked for a non-positive number of dice.
    #[error("invalid dice count: {0}")]
    InvalidCount(u32),

    /// A tray position does not exist.
    #[error("position {position} out of range (tray holds {len})")]
    OutOfRange {
        /// The requested position.
        position: usize,
        /// Number of entries in the tray at the time.
        len: usize,
    },
}

impl DiceError {
    /// Whether the error is a rejected input, as opposed to a stale position.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidDie(_) | Self::InvalidCount(_))
    }
}

/// Convenience result type for dice operations.
pub type DiceResult<T> = Result<T, DiceError>;
