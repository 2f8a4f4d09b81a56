//! Unique identifier generation.
//!
//! Every dice entry and preset carries an identifier that must not collide
//! with any other generated in the same process. [`RandomIds`] draws UUID v4
//! values; [`SequentialIds`] combines a per-session salt with a counter, which
//! keeps identifiers predictable in tests and replays.

use uuid::Uuid;

/// A source of process-unique identifiers.
pub trait IdGenerator {
    /// Produce a fresh identifier.
    fn generate(&mut self) -> Uuid;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Counter-based identifiers salted per session.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    salt: u64,
    counter: u64,
}

impl SequentialIds {
    /// Start a new sequence with the given salt.
    pub fn new(salt: u64) -> Self {
        Self { salt, counter: 0 }
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&mut self) -> Uuid {
        self.counter += 1;
        Uuid::from_u64_pair(self.salt, self.counter)
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn generate(&mut self) -> Uuid {
        (**self).generate()
    }
}
